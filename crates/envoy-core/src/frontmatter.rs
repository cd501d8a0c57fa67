//! Frontmatter extraction for skill definition files.
//!
//! A skill file opens with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! name: brainstorming
//! description: Use when starting a new piece of work
//! ---
//! <body>
//! ```
//!
//! Extraction is deliberately forgiving: an unreadable file, a missing
//! delimiter, or a malformed block all yield `None`. Directory scans must
//! tolerate partially-written or foreign files, so absence of metadata is a
//! normal signal, never an error.

use std::collections::HashMap;
use std::path::Path;

const DELIMITER: &str = "---";

/// Parsed `key: value` fields from a frontmatter block.
#[derive(Debug, Clone, Default)]
pub struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The skill name, if present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.get("name").filter(|v| !v.is_empty())
    }

    pub fn description(&self) -> Option<&str> {
        self.get("description").filter(|v| !v.is_empty())
    }
}

/// Read `path` and parse its leading frontmatter block.
///
/// Returns `None` if the file cannot be read or the block is malformed.
pub fn extract_frontmatter(path: &Path) -> Option<Frontmatter> {
    let content = std::fs::read_to_string(path).ok()?;
    parse_frontmatter(&content)
}

/// Parse a frontmatter block from raw file content.
///
/// The block is everything between the first two `---` lines; each line in
/// between is parsed as `key: value` (first colon splits, both sides
/// trimmed). Lines without a colon are ignored rather than rejected.
pub fn parse_frontmatter(content: &str) -> Option<Frontmatter> {
    let mut lines = content.lines();

    if lines.next()?.trim() != DELIMITER {
        return None;
    }

    let mut fields = HashMap::new();
    let mut closed = false;
    for line in lines {
        if line.trim() == DELIMITER {
            closed = true;
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    if !closed {
        return None;
    }
    Some(Frontmatter { fields })
}

//! Stack profile loading and section extraction.
//!
//! A stack profile is a freeform markdown document at
//! `<stacksDir>/<stack-name>.md` with conventional `## Common Mistakes` and
//! `## Review Checklist` headings. An absent file or absent section yields
//! `None`; nothing here errors.

use crate::paths::stack_profile_path;
use std::path::Path;

const COMMON_MISTAKES_HEADING: &str = "Common Mistakes";
const REVIEW_CHECKLIST_HEADING: &str = "Review Checklist";

/// Read one stack profile document, or `None` if it cannot be read.
pub fn load_stack_profile(stacks_dir: &Path, name: &str) -> Option<String> {
    std::fs::read_to_string(stack_profile_path(stacks_dir, name)).ok()
}

/// Load several profiles, skipping those that are absent.
/// Returns `(name, content)` pairs in input order.
pub fn load_stack_profiles<S: AsRef<str>>(stacks_dir: &Path, names: &[S]) -> Vec<(String, String)> {
    names
        .iter()
        .filter_map(|name| {
            load_stack_profile(stacks_dir, name.as_ref())
                .map(|content| (name.as_ref().to_string(), content))
        })
        .collect()
}

pub fn extract_common_mistakes(content: &str) -> Option<String> {
    extract_section(content, COMMON_MISTAKES_HEADING)
}

pub fn extract_review_checklist(content: &str) -> Option<String> {
    extract_section(content, REVIEW_CHECKLIST_HEADING)
}

/// Extract the text between `## <heading>` and the next `## ` heading (or
/// end of document). `None` if the heading is absent.
fn extract_section(content: &str, heading: &str) -> Option<String> {
    let target = format!("## {heading}");
    let mut section: Vec<&str> = Vec::new();
    let mut in_section = false;

    for line in content.lines() {
        if in_section {
            if line.starts_with("## ") {
                break;
            }
            section.push(line);
        } else if line.trim_end() == target {
            in_section = true;
        }
    }

    if !in_section {
        return None;
    }
    Some(section.join("\n").trim().to_string())
}

use crate::error::{EnvoyError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Filename of a skill definition inside its directory.
pub const SKILL_FILE: &str = "SKILL.md";

/// Namespace prefix that forces resolution against the plugin root.
pub const PLUGIN_PREFIX: &str = "envoy";

/// Subdirectory levels scanned below a skills root (depth 0 = its children).
pub const DEFAULT_SCAN_DEPTH: usize = 3;

/// Personal skills directory, relative to the user's home.
pub const PERSONAL_SKILLS_DIR: &str = ".claude/skills";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn skill_file(root: &Path, name: &str) -> PathBuf {
    root.join(name).join(SKILL_FILE)
}

pub fn stack_profile_path(stacks_dir: &Path, name: &str) -> PathBuf {
    stacks_dir.join(format!("{name}.md"))
}

/// Default personal skills root (`~/.claude/skills`).
pub fn personal_skills_dir() -> Result<PathBuf> {
    home::home_dir()
        .map(|h| h.join(PERSONAL_SKILLS_DIR))
        .ok_or(EnvoyError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Skill name validation
// ---------------------------------------------------------------------------

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_skill_name(name: &str) -> Result<()> {
    if name.is_empty() || name.len() > 64 || !name_re().is_match(name) {
        return Err(EnvoyError::InvalidSkillName(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

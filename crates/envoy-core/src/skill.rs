//! Skill discovery and resolution.
//!
//! Skills live at `<root>/<skill-name>/SKILL.md` under two roots: the
//! plugin's own skills directory and the user's personal one. A personal
//! skill shadows the plugin skill of the same name unless the caller forces
//! the plugin copy with the `envoy:` namespace prefix.

use crate::frontmatter::extract_frontmatter;
use crate::paths::{DEFAULT_SCAN_DEPTH, PLUGIN_PREFIX, SKILL_FILE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ---------------------------------------------------------------------------
// SourceType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Plugin,
    Personal,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Plugin => write!(f, "plugin"),
            SourceType::Personal => write!(f, "personal"),
        }
    }
}

// ---------------------------------------------------------------------------
// SkillDescriptor / ResolvedSkill
// ---------------------------------------------------------------------------

/// One discoverable skill. Constructed fresh on every scan; nothing is
/// cached across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub file_path: PathBuf,
    pub source: SourceType,
    /// Set only by [`list_all_skills`]: true on a plugin descriptor whose
    /// name is also claimed by a personal skill.
    pub shadowed: bool,
}

/// Result of resolving one skill reference to a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedSkill {
    pub file_path: PathBuf,
    pub source: SourceType,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Scan `root` for skill directories, up to `max_depth` levels of
/// subdirectories (depth 0 = direct children of `root`).
///
/// A directory contributes a descriptor only if it holds a `SKILL.md` whose
/// frontmatter parses with a non-empty `name`. Unreadable directories are
/// skipped; this is best-effort discovery, not a mandatory inventory.
/// Descriptors come back in depth-first visit order, siblings in
/// directory-listing order.
pub fn find_skills_in_dir(root: &Path, source: SourceType, max_depth: usize) -> Vec<SkillDescriptor> {
    let mut found = Vec::new();
    scan(root, source, 0, max_depth, &mut found);
    found
}

fn scan(
    dir: &Path,
    source: SourceType,
    depth: usize,
    max_depth: usize,
    found: &mut Vec<SkillDescriptor>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("skipping unreadable directory {}: {}", dir.display(), e);
            return;
        }
    };

    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let skill_file = path.join(SKILL_FILE);
        if let Some(fm) = extract_frontmatter(&skill_file) {
            if let Some(name) = fm.name() {
                found.push(SkillDescriptor {
                    name: name.to_string(),
                    description: fm.description().map(str::to_string),
                    file_path: skill_file,
                    source,
                    shadowed: false,
                });
            }
        }

        if depth < max_depth {
            scan(&path, source, depth + 1, max_depth, found);
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Map a skill reference to its definition file.
///
/// A bare name resolves personal-first, then plugin. An `envoy:`-prefixed
/// name strips the prefix and resolves against the plugin root only, even
/// when a personal override exists. Returns `None` when no definition file
/// exists under the applicable roots.
pub fn resolve_skill_path(
    skill_name: &str,
    plugin_dir: &Path,
    personal_dir: &Path,
) -> Option<ResolvedSkill> {
    if let Some(bare) = strip_plugin_prefix(skill_name) {
        return resolve_under(plugin_dir, bare, SourceType::Plugin);
    }

    resolve_under(personal_dir, skill_name, SourceType::Personal)
        .or_else(|| resolve_under(plugin_dir, skill_name, SourceType::Plugin))
}

fn resolve_under(root: &Path, name: &str, source: SourceType) -> Option<ResolvedSkill> {
    let candidate = root.join(name).join(SKILL_FILE);
    if candidate.is_file() {
        Some(ResolvedSkill {
            file_path: candidate,
            source,
        })
    } else {
        None
    }
}

/// Strip the `envoy:` namespace prefix, if present.
pub fn strip_plugin_prefix(skill_name: &str) -> Option<&str> {
    skill_name
        .strip_prefix(PLUGIN_PREFIX)
        .and_then(|rest| rest.strip_prefix(':'))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Union of skills under both roots, personal descriptors first.
///
/// Plugin descriptors whose name also appears among the personal ones are
/// marked `shadowed` but still included; personal descriptors are never
/// shadowed.
pub fn list_all_skills(plugin_dir: &Path, personal_dir: &Path) -> Vec<SkillDescriptor> {
    let personal = find_skills_in_dir(personal_dir, SourceType::Personal, DEFAULT_SCAN_DEPTH);
    let mut plugin = find_skills_in_dir(plugin_dir, SourceType::Plugin, DEFAULT_SCAN_DEPTH);

    let personal_names: HashSet<&str> = personal.iter().map(|s| s.name.as_str()).collect();
    for skill in &mut plugin {
        if personal_names.contains(skill.name.as_str()) {
            skill.shadowed = true;
        }
    }

    let mut all = personal;
    all.append(&mut plugin);
    all
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

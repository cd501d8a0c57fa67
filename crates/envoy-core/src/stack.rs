//! Stack detection: map a project tree (or a changed-file list) to the set
//! of technology names whose detection rule is satisfied.
//!
//! The rule table is static and immutable; evaluation is a pure fold over it.
//! A rule whose evaluation fails is simply unmatched. Whenever any web
//! indicator matches, a synthetic `security` entry is appended so the host
//! loads the security profile alongside the web ones.

use crate::fsquery::{FsQuery, WalkQuery};
use crate::paths::DEFAULT_SCAN_DEPTH;
use std::path::Path;

// ---------------------------------------------------------------------------
// DetectionRule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum DetectionRule {
    /// Satisfied if a file matching `glob` exists within the bounded depth.
    FileExistence {
        name: &'static str,
        glob: &'static str,
    },
    /// Satisfied if any file matching one of `scope` contains `pattern`.
    ContentMatch {
        name: &'static str,
        pattern: &'static str,
        scope: &'static [&'static str],
    },
}

impl DetectionRule {
    pub fn name(&self) -> &'static str {
        match self {
            DetectionRule::FileExistence { name, .. } => name,
            DetectionRule::ContentMatch { name, .. } => name,
        }
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

static RULES: &[DetectionRule] = &[
    DetectionRule::FileExistence {
        name: "dotnet",
        glob: "*.csproj",
    },
    DetectionRule::FileExistence {
        name: "typescript",
        glob: "tsconfig.json",
    },
    DetectionRule::ContentMatch {
        name: "react",
        pattern: r#""react"|"react-dom"|"next""#,
        scope: &["package.json"],
    },
    DetectionRule::ContentMatch {
        name: "api-patterns",
        pattern: r"ControllerBase|\[ApiController\]|app\.MapGet|app\.MapPost",
        scope: &["*.cs"],
    },
    DetectionRule::ContentMatch {
        name: "testing-dotnet",
        pattern: r#"xunit|nunit|MSTest\.TestFramework"#,
        scope: &["*.csproj"],
    },
    DetectionRule::FileExistence {
        name: "bicep",
        glob: "*.bicep",
    },
    DetectionRule::FileExistence {
        name: "terraform",
        glob: "*.tf",
    },
    DetectionRule::FileExistence {
        name: "github-actions",
        glob: ".github/workflows/*.{yml,yaml}",
    },
    DetectionRule::FileExistence {
        name: "docker",
        glob: "Dockerfile",
    },
    DetectionRule::FileExistence {
        name: "python",
        glob: "{pyproject.toml,requirements.txt}",
    },
];

/// Rules whose match indicates a web application; any of these pulls in the
/// synthetic `security` entry.
const WEB_INDICATORS: &[&str] = &["dotnet", "react", "api-patterns", "typescript"];

const SECURITY: &str = "security";

pub fn default_rules() -> &'static [DetectionRule] {
    RULES
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Evaluate the rule table against `project_dir` with the real filesystem.
pub fn detect_stacks(project_dir: &Path) -> Vec<String> {
    detect_stacks_with(&WalkQuery, project_dir)
}

/// Evaluate the rule table against `project_dir` through `query`.
///
/// Each rule contributes its name at most once; result order follows the
/// rule table. A rule that fails to evaluate is unmatched and never aborts
/// the remaining rules.
pub fn detect_stacks_with(query: &dyn FsQuery, project_dir: &Path) -> Vec<String> {
    let mut matched = Vec::new();
    for rule in default_rules() {
        let hit = match rule {
            DetectionRule::FileExistence { glob, .. } => {
                query.file_exists(glob, project_dir, DEFAULT_SCAN_DEPTH)
            }
            DetectionRule::ContentMatch { pattern, scope, .. } => {
                query.grep_content(pattern, scope, project_dir)
            }
        };
        if hit {
            push_unique(&mut matched, rule.name());
        }
    }
    infer_security(&mut matched);
    matched
}

/// Classify a known set of changed file paths without touching the
/// filesystem. Used when scoping detection to a diff.
pub fn detect_stacks_from_files<P: AsRef<Path>>(paths: &[P]) -> Vec<String> {
    let mut matched = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let lower = path.to_string_lossy().to_lowercase();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some("cs") => {
                push_unique(&mut matched, "dotnet");
                push_unique(&mut matched, "api-patterns");
                if lower.contains("test") {
                    push_unique(&mut matched, "testing-dotnet");
                }
            }
            Some("csproj") | Some("sln") => push_unique(&mut matched, "dotnet"),
            Some("tsx") => {
                push_unique(&mut matched, "typescript");
                push_unique(&mut matched, "react");
            }
            Some("jsx") => {
                push_unique(&mut matched, "javascript");
                push_unique(&mut matched, "react");
            }
            Some("ts") => push_unique(&mut matched, "typescript"),
            Some("js") => push_unique(&mut matched, "javascript"),
            Some("py") => push_unique(&mut matched, "python"),
            Some("bicep") => push_unique(&mut matched, "bicep"),
            Some("tf") => push_unique(&mut matched, "terraform"),
            _ => {}
        }

        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.eq_ignore_ascii_case("Dockerfile"))
        {
            push_unique(&mut matched, "docker");
        }
        if lower.contains(".github/workflows") {
            push_unique(&mut matched, "github-actions");
        }
    }

    infer_security(&mut matched);
    matched
}

fn push_unique(matched: &mut Vec<String>, name: &str) {
    if !matched.iter().any(|m| m == name) {
        matched.push(name.to_string());
    }
}

fn infer_security(matched: &mut Vec<String>) {
    if matched.iter().any(|m| WEB_INDICATORS.contains(&m.as_str())) {
        push_unique(matched, SECURITY);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

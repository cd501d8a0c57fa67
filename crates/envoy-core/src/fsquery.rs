//! Filesystem query seam for detection-rule evaluation.
//!
//! Rule evaluation only needs two questions answered: "does a file matching
//! this glob exist?" and "does any file with one of these names contain this
//! pattern?". Putting them behind a trait keeps [`crate::stack`] testable
//! against an in-memory fake instead of a real directory tree.
//!
//! Every failure mode (unreadable directory, bad pattern, non-UTF-8 content)
//! evaluates to `false`. A rule that cannot be evaluated is unmatched,
//! indistinguishable from a confirmed absence.

use globset::{Glob, GlobSetBuilder};
use regex::Regex;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

pub trait FsQuery {
    /// True if at least one file under `root`, within `max_depth` directory
    /// levels, matches `glob` (against its root-relative path or bare name).
    fn file_exists(&self, glob: &str, root: &Path, max_depth: usize) -> bool;

    /// True if any file under `root` whose name matches one of
    /// `filename_globs` contains a match for `pattern`.
    fn grep_content(&self, pattern: &str, filename_globs: &[&str], root: &Path) -> bool;
}

/// The real implementation: bounded directory walks, no caching.
pub struct WalkQuery;

impl FsQuery for WalkQuery {
    fn file_exists(&self, glob: &str, root: &Path, max_depth: usize) -> bool {
        let Ok(matcher) = Glob::new(glob).map(|g| g.compile_matcher()) else {
            debug!("unparseable glob '{glob}', treating as unmatched");
            return false;
        };

        for entry in WalkDir::new(root)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if matcher.is_match(rel) || matcher.is_match(Path::new(entry.file_name())) {
                return true;
            }
        }
        false
    }

    fn grep_content(&self, pattern: &str, filename_globs: &[&str], root: &Path) -> bool {
        let Ok(re) = Regex::new(pattern) else {
            debug!("unparseable pattern '{pattern}', treating as unmatched");
            return false;
        };

        let mut builder = GlobSetBuilder::new();
        for glob in filename_globs {
            match Glob::new(glob) {
                Ok(g) => {
                    builder.add(g);
                }
                Err(_) => {
                    debug!("unparseable glob '{glob}', treating as unmatched");
                    return false;
                }
            }
        }
        let Ok(names) = builder.build() else {
            return false;
        };

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() || !names.is_match(Path::new(entry.file_name())) {
                continue;
            }
            let Ok(content) = std::fs::read_to_string(entry.path()) else {
                continue;
            };
            if re.is_match(&content) {
                return true;
            }
        }
        false
    }
}

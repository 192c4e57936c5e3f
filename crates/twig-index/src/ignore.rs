//! `.twigignore` pattern handling.
//!
//! One pattern per line, matched as a leading path prefix against
//! work-tree-relative paths. Blank lines and `#` comments are skipped.
//! The control directory is always excluded, pattern file or not.

use std::fs;
use std::path::Path;

/// Name of the ignore file at the work-tree root.
pub const IGNORE_FILE: &str = ".twigignore";

/// Control-metadata directory, unconditionally ignored.
const CONTROL_DIR: &str = ".twig";

/// Loaded ignore patterns for one work tree.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<String>,
}

impl IgnoreList {
    /// Load patterns from `<work_tree>/.twigignore`. A missing file means
    /// no patterns.
    pub fn load(work_tree: &Path) -> std::io::Result<Self> {
        let path = work_tree.join(IGNORE_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(e),
        };
        Ok(Self::from_lines(content.lines()))
    }

    /// Build from pattern lines directly.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let patterns = lines
            .into_iter()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        Self { patterns }
    }

    /// Should this work-tree-relative path be ignored?
    pub fn is_ignored(&self, rel_path: &str) -> bool {
        if rel_path == CONTROL_DIR || rel_path.starts_with(".twig/") {
            return true;
        }
        self.patterns.iter().any(|p| rel_path.starts_with(p.as_str()))
    }
}

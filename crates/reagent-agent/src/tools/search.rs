//! File search tool — recursive glob matching over a directory tree.
//!
//! Walks the tree with `walkdir`, matching file names against a glob-style
//! pattern. Hidden directories and well-known dependency/cache directories
//! are skipped, and results are capped to keep the tool output within a
//! usable text size.

use std::collections::HashMap;

use async_trait::async_trait;
use reagent_core::utils::expand_home;
use regex::Regex;
use serde_json::{json, Value};
use walkdir::WalkDir;

use super::base::{optional_string, require_string, Tool};

/// Result cap — matches beyond this are dropped (walk order, not sorted).
const MAX_RESULTS: usize = 50;

/// Noise directories never descended into.
const IGNORED_DIRS: &[&str] = &["node_modules", "target", "__pycache__", "venv"];

// ─────────────────────────────────────────────
// SearchFilesTool
// ─────────────────────────────────────────────

/// Recursively searches a directory tree for files matching a glob pattern.
pub struct SearchFilesTool;

impl SearchFilesTool {
    /// Translate a glob pattern (`*`, `?`) into an anchored regex.
    fn glob_to_regex(pattern: &str) -> anyhow::Result<Regex> {
        let mut re = String::with_capacity(pattern.len() + 8);
        re.push('^');
        for c in pattern.chars() {
            match c {
                '*' => re.push_str(".*"),
                '?' => re.push('.'),
                c if "\\.+()[]{}^$|".contains(c) => {
                    re.push('\\');
                    re.push(c);
                }
                c => re.push(c),
            }
        }
        re.push('$');
        Regex::new(&re).map_err(|e| anyhow::anyhow!("Invalid pattern '{pattern}': {e}"))
    }

    /// Whether a directory entry should be descended into.
    fn keep_dir(name: &str) -> bool {
        !name.starts_with('.') && !IGNORED_DIRS.contains(&name)
    }
}

#[async_trait]
impl Tool for SearchFilesTool {
    fn name(&self) -> &str {
        "search_files"
    }

    fn description(&self) -> &str {
        "Recursively search a directory for files whose names match a glob pattern \
         (e.g. '*.rs'). Hidden and dependency directories are skipped; at most 50 \
         matches are returned."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern to match file names against (supports * and ?)"
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search (defaults to the current directory)"
                }
            },
            "required": ["pattern"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let pattern = require_string(&params, "pattern")?;
        let root = expand_home(&optional_string(&params, "path").unwrap_or_else(|| ".".to_string()));
        let regex = Self::glob_to_regex(&pattern)?;

        let mut matches: Vec<String> = Vec::new();

        let walker = WalkDir::new(&root).into_iter().filter_entry(|e| {
            // Never prune the root itself, even if it is hidden (e.g. ".")
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir() {
                Self::keep_dir(&name)
            } else {
                true
            }
        });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if regex.is_match(&name) {
                matches.push(entry.path().display().to_string());
                if matches.len() >= MAX_RESULTS {
                    break;
                }
            }
        }

        if matches.is_empty() {
            Ok(format!("No files matching '{pattern}' found"))
        } else {
            Ok(matches.join("\n"))
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_params(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[tokio::test]
    async fn test_search_finds_matches() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("main.rs"), "").unwrap();
        std::fs::write(dir.path().join("lib.rs"), "").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("deep.rs"), "").unwrap();

        let tool = SearchFilesTool;
        let result = tool
            .execute(make_params(&[
                ("pattern", "*.rs"),
                ("path", dir.path().to_str().unwrap()),
            ]))
            .await
            .unwrap();

        assert!(result.contains("main.rs"));
        assert!(result.contains("lib.rs"));
        assert!(result.contains("deep.rs"));
        assert!(!result.contains("notes.md"));
    }

    #[tokio::test]
    async fn test_search_no_match_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("only.txt"), "").unwrap();

        let tool = SearchFilesTool;
        let result = tool
            .execute(make_params(&[
                ("pattern", "*.py"),
                ("path", dir.path().to_str().unwrap()),
            ]))
            .await
            .unwrap();
        assert_eq!(result, "No files matching '*.py' found");
    }

    #[tokio::test]
    async fn test_search_skips_hidden_and_ignored_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git").join("config.rs"), "").unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::write(dir.path().join("node_modules").join("dep.rs"), "").unwrap();
        std::fs::create_dir(dir.path().join("target")).unwrap();
        std::fs::write(dir.path().join("target").join("built.rs"), "").unwrap();
        std::fs::write(dir.path().join("visible.rs"), "").unwrap();

        let tool = SearchFilesTool;
        let result = tool
            .execute(make_params(&[
                ("pattern", "*.rs"),
                ("path", dir.path().to_str().unwrap()),
            ]))
            .await
            .unwrap();

        assert!(result.contains("visible.rs"));
        assert!(!result.contains("config.rs"));
        assert!(!result.contains("dep.rs"));
        assert!(!result.contains("built.rs"));
    }

    /// Given more than 50 matching files, exactly 50 are returned.
    #[tokio::test]
    async fn test_search_truncates_at_fifty() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..75 {
            std::fs::write(dir.path().join(format!("file_{i:03}.log")), "").unwrap();
        }

        let tool = SearchFilesTool;
        let result = tool
            .execute(make_params(&[
                ("pattern", "*.log"),
                ("path", dir.path().to_str().unwrap()),
            ]))
            .await
            .unwrap();
        assert_eq!(result.lines().count(), 50);
    }

    #[tokio::test]
    async fn test_search_question_mark_wildcard() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a1.txt"), "").unwrap();
        std::fs::write(dir.path().join("a22.txt"), "").unwrap();

        let tool = SearchFilesTool;
        let result = tool
            .execute(make_params(&[
                ("pattern", "a?.txt"),
                ("path", dir.path().to_str().unwrap()),
            ]))
            .await
            .unwrap();
        assert!(result.contains("a1.txt"));
        assert!(!result.contains("a22.txt"));
    }

    #[tokio::test]
    async fn test_search_missing_pattern_param() {
        let tool = SearchFilesTool;
        let result = tool.execute(HashMap::new()).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("pattern"));
    }

    #[test]
    fn test_glob_to_regex_escapes_specials() {
        // A dot in the pattern must not match any character
        let re = SearchFilesTool::glob_to_regex("*.rs").unwrap();
        assert!(re.is_match("main.rs"));
        assert!(!re.is_match("mainxrs"));
    }
}

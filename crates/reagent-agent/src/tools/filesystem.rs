//! Filesystem tools — read, write, list directory.
//!
//! Empty results get explicit sentinels so the model can tell "no content"
//! apart from "tool produced nothing".

use std::collections::HashMap;

use async_trait::async_trait;
use reagent_core::utils::expand_home;
use serde_json::{json, Value};

use super::base::{optional_string, require_string, Tool};

// ─────────────────────────────────────────────
// ReadFileTool
// ─────────────────────────────────────────────

/// Reads and returns the entire content of a file.
pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file. Use this to inspect code, configuration, or data files."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the file to read"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let path_str = require_string(&params, "path")?;
        let path = expand_home(&path_str);

        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        if !path.is_file() {
            anyhow::bail!("Not a file: {}", path.display());
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

        if content.is_empty() {
            Ok("(empty file)".into())
        } else {
            Ok(content)
        }
    }
}

// ─────────────────────────────────────────────
// WriteFileTool
// ─────────────────────────────────────────────

/// Creates or overwrites a file with the given content.
pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, creating it if it doesn't exist or overwriting if it does. \
         Parent directories are created automatically."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path for the file"
                },
                "content": {
                    "type": "string",
                    "description": "Content to write to the file"
                }
            },
            "required": ["path", "content"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let path_str = require_string(&params, "path")?;
        let content = require_string(&params, "content")?;
        let path = expand_home(&path_str);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    anyhow::anyhow!("Failed to create directory {}: {e}", parent.display())
                })?;
            }
        }

        let bytes = content.as_bytes().len();
        std::fs::write(&path, &content)
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
        Ok(format!("Wrote {bytes} bytes to {}", path.display()))
    }
}

// ─────────────────────────────────────────────
// ListDirTool
// ─────────────────────────────────────────────

/// Lists the immediate children of a directory.
pub struct ListDirTool;

#[async_trait]
impl Tool for ListDirTool {
    fn name(&self) -> &str {
        "list_dir"
    }

    fn description(&self) -> &str {
        "List the contents of a directory (non-recursive). \
         Directories are marked with a trailing slash; files show their size in bytes."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path to the directory to list (defaults to the current directory)"
                }
            },
            "required": []
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let path_str = optional_string(&params, "path").unwrap_or_else(|| ".".to_string());
        let path = expand_home(&path_str);

        if !path.exists() {
            anyhow::bail!("Directory not found: {}", path.display());
        }
        if !path.is_dir() {
            anyhow::bail!("Not a directory: {}", path.display());
        }

        let mut dir_entries: Vec<_> = std::fs::read_dir(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {e}", path.display()))?
            .filter_map(|e| e.ok())
            .collect();

        dir_entries.sort_by_key(|e| e.file_name());

        let mut entries: Vec<String> = Vec::new();
        for entry in dir_entries {
            let name = entry.file_name().to_string_lossy().to_string();
            let metadata = entry.metadata();
            let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
            if is_dir {
                entries.push(format!("📁 {name}/"));
            } else {
                let size = metadata.map(|m| m.len()).unwrap_or(0);
                entries.push(format!("📄 {name} ({size} bytes)"));
            }
        }

        if entries.is_empty() {
            Ok("(empty directory)".into())
        } else {
            Ok(entries.join("\n"))
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

    // ── ReadFileTool ──

    #[tokio::test]
    async fn test_read_file_success() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, "Hello, Reagent!").unwrap();

        let tool = ReadFileTool;
        let result = tool
            .execute(make_params(&[("path", file.to_str().unwrap())]))
            .await
            .unwrap();
        assert_eq!(result, "Hello, Reagent!");
    }

    #[tokio::test]
    async fn test_read_file_not_found() {
        let tool = ReadFileTool;
        let result = tool
            .execute(make_params(&[("path", "/tmp/nonexistent_reagent_file.txt")]))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("File not found"));
    }

    #[tokio::test]
    async fn test_read_empty_file_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.txt");
        std::fs::write(&file, "").unwrap();

        let tool = ReadFileTool;
        let result = tool
            .execute(make_params(&[("path", file.to_str().unwrap())]))
            .await
            .unwrap();
        assert_eq!(result, "(empty file)");
    }

    // ── WriteFileTool ──

    #[tokio::test]
    async fn test_write_file_reports_byte_count() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("output.txt");

        let tool = WriteFileTool;
        let result = tool
            .execute(make_params(&[
                ("path", file.to_str().unwrap()),
                ("content", "Written content"),
            ]))
            .await
            .unwrap();
        assert!(result.contains("Wrote 15 bytes"));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "Written content");
    }

    #[tokio::test]
    async fn test_write_file_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("sub").join("deep").join("file.txt");

        let tool = WriteFileTool;
        tool.execute(make_params(&[
            ("path", file.to_str().unwrap()),
            ("content", "deep content"),
        ]))
        .await
        .unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "deep content");
    }

    #[tokio::test]
    async fn test_write_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("over.txt");
        std::fs::write(&file, "old").unwrap();

        let tool = WriteFileTool;
        tool.execute(make_params(&[
            ("path", file.to_str().unwrap()),
            ("content", "new"),
        ]))
        .await
        .unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
    }

    /// Writing content to a path then reading it returns exactly that content.
    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("round.txt");
        let content = "line one\nline two\nunicode: こんにちは\n";

        WriteFileTool
            .execute(make_params(&[
                ("path", file.to_str().unwrap()),
                ("content", content),
            ]))
            .await
            .unwrap();

        let read_back = ReadFileTool
            .execute(make_params(&[("path", file.to_str().unwrap())]))
            .await
            .unwrap();
        assert_eq!(read_back, content);
    }

    // ── ListDirTool ──

    #[tokio::test]
    async fn test_list_dir_shows_sizes_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("file_a.txt"), "12345").unwrap();
        std::fs::create_dir(dir.path().join("subdir")).unwrap();

        let tool = ListDirTool;
        let result = tool
            .execute(make_params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();
        assert!(result.contains("📄 file_a.txt (5 bytes)"));
        assert!(result.contains("📁 subdir/"));
    }

    #[tokio::test]
    async fn test_list_dir_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();
        std::fs::write(dir.path().join("a.txt"), "").unwrap();
        std::fs::write(dir.path().join("c.txt"), "").unwrap();

        let tool = ListDirTool;
        let result = tool
            .execute(make_params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();
        let a = result.find("a.txt").unwrap();
        let b = result.find("b.txt").unwrap();
        let c = result.find("c.txt").unwrap();
        assert!(a < b && b < c);
    }

    #[tokio::test]
    async fn test_list_dir_empty_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let tool = ListDirTool;
        let result = tool
            .execute(make_params(&[("path", dir.path().to_str().unwrap())]))
            .await
            .unwrap();
        assert_eq!(result, "(empty directory)");
    }

    #[tokio::test]
    async fn test_list_dir_not_found() {
        let tool = ListDirTool;
        let result = tool
            .execute(make_params(&[("path", "/tmp/nonexistent_reagent_dir")]))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    // ── Tool definitions ──

    #[test]
    fn test_tool_definitions() {
        let tools: Vec<Box<dyn Tool>> = vec![
            Box::new(ReadFileTool),
            Box::new(WriteFileTool),
            Box::new(ListDirTool),
        ];
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["read_file", "write_file", "list_dir"]);

        for tool in &tools {
            let def = tool.to_definition();
            assert_eq!(def.tool_type, "function");
            assert!(!def.function.description.is_empty());
        }
    }
}

//! Shell tool — execute commands in a subprocess.
//!
//! Runs the command through `sh -c` (or `cmd /C` on Windows) with a hard
//! wall-clock timeout. Output, stderr, and a non-zero exit code all come
//! back as text so the model can react to them.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::process::Command;
use tracing::debug;

use super::base::{require_string, Tool};

/// Maximum output length before truncation (characters).
const MAX_OUTPUT_LEN: usize = 10_000;

/// Default command timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ─────────────────────────────────────────────
// BashTool
// ─────────────────────────────────────────────

/// Execute shell commands in a subprocess.
pub struct BashTool {
    /// Command timeout.
    timeout: Duration,
}

impl BashTool {
    /// Create a new `BashTool` with the given timeout (default 60 s).
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Default for BashTool {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Tool for BashTool {
    fn name(&self) -> &str {
        "bash"
    }

    fn description(&self) -> &str {
        "Execute a shell command and return its output. \
         Use this for running system commands, installing dependencies, or executing scripts."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The shell command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<String> {
        let command = require_string(&params, "command")?;

        debug!(command = %command, "executing shell command");

        let child = Command::new(if cfg!(target_os = "windows") { "cmd" } else { "sh" })
            .args(if cfg!(target_os = "windows") {
                vec!["/C", &command]
            } else {
                vec!["-c", &command]
            })
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            // On timeout the child must die with the dropped future, so its
            // buffered output is discarded rather than leaked
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| anyhow::anyhow!("Failed to spawn command: {e}"))?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        match result {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout).to_string();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                let code = output.status.code().unwrap_or(-1);

                let mut parts = Vec::new();
                if !stdout.is_empty() {
                    parts.push(stdout);
                }
                if !stderr.is_empty() {
                    parts.push(format!("STDERR:\n{stderr}"));
                }
                if code != 0 {
                    parts.push(format!("Exit code: {code}"));
                }

                let mut combined = if parts.is_empty() {
                    "(no output)".to_string()
                } else {
                    parts.join("\n")
                };

                // Count and cut in chars, not bytes — a byte-offset truncate
                // can land inside a multibyte sequence
                let total_chars = combined.chars().count();
                if total_chars > MAX_OUTPUT_LEN {
                    let remaining = total_chars - MAX_OUTPUT_LEN;
                    combined = combined.chars().take(MAX_OUTPUT_LEN).collect();
                    combined.push_str(&format!("\n... (truncated, {remaining} more chars)"));
                }

                Ok(combined)
            }
            Ok(Err(e)) => {
                anyhow::bail!("Command failed: {e}");
            }
            Err(_) => Ok(format!(
                "Error: Command timed out after {} seconds",
                self.timeout.as_secs()
            )),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

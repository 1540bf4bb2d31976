//! Config loader — reads `~/.reagent/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.reagent/config.json`
//! 3. Environment variables `REAGENT_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be
/// parsed — a broken config file is never fatal.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return apply_env_overrides(Config::default());
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return apply_env_overrides(Config::default());
        }
    };

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            return apply_env_overrides(Config::default());
        }
    };

    apply_env_overrides(config)
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Env var format: `REAGENT_<SECTION>__<FIELD>` (double underscore as
/// delimiter).
///
/// Supported overrides:
/// - `REAGENT_AGENT__MODEL` → `agent.model`
/// - `REAGENT_AGENT__MAX_TOKENS` → `agent.max_tokens`
/// - `REAGENT_AGENT__TEMPERATURE` → `agent.temperature`
/// - `REAGENT_AGENT__MAX_ITERATIONS` → `agent.max_iterations`
/// - `REAGENT_AGENT__VERBOSE` → `agent.verbose`
/// - `REAGENT_PROVIDER__API_KEY` → `provider.api_key`
/// - `REAGENT_PROVIDER__API_BASE` → `provider.api_base`
fn apply_env_overrides(mut config: Config) -> Config {
    if let Ok(val) = std::env::var("REAGENT_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Ok(val) = std::env::var("REAGENT_AGENT__MAX_TOKENS") {
        if let Ok(n) = val.parse::<u32>() {
            config.agent.max_tokens = n;
        }
    }
    if let Ok(val) = std::env::var("REAGENT_AGENT__TEMPERATURE") {
        if let Ok(t) = val.parse::<f64>() {
            config.agent.temperature = t;
        }
    }
    if let Ok(val) = std::env::var("REAGENT_AGENT__MAX_ITERATIONS") {
        if let Ok(n) = val.parse::<u32>() {
            config.agent.max_iterations = n;
        }
    }
    if let Ok(val) = std::env::var("REAGENT_AGENT__VERBOSE") {
        config.agent.verbose = val == "true" || val == "1";
    }

    if let Ok(val) = std::env::var("REAGENT_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Ok(val) = std::env::var("REAGENT_PROVIDER__API_BASE") {
        config.provider.api_base = val;
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.json"));
        // Should return defaults
        assert_eq!(config.agent.model, "moonshot-v1-8k");
        assert_eq!(config.agent.max_iterations, 10);
    }

    #[test]
    fn test_load_valid_json() {
        let file = write_temp_json(
            r#"{
                "agent": { "model": "kimi-k2", "maxIterations": 3 },
                "provider": { "apiKey": "sk-json" }
            }"#,
        );
        let config = load_config_from_path(file.path());

        assert_eq!(config.agent.model, "kimi-k2");
        assert_eq!(config.agent.max_iterations, 3);
        assert_eq!(config.provider.api_key, "sk-json");
    }

    #[test]
    fn test_load_malformed_json_falls_back() {
        let file = write_temp_json("{ not json at all");
        let config = load_config_from_path(file.path());
        // Defaults, not a panic
        assert_eq!(config.agent.model, "moonshot-v1-8k");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.agent.model = "saved-model".into();
        config.provider.api_key = "sk-saved".into();

        save_config(&config, Some(&path)).unwrap();
        let reloaded = load_config_from_path(&path);

        assert_eq!(reloaded.agent.model, "saved-model");
        assert_eq!(reloaded.provider.api_key, "sk-saved");
    }

    #[test]
    fn test_saved_json_uses_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        save_config(&Config::default(), Some(&path)).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert!(content.contains("maxIterations"));
        assert!(content.contains("apiBase"));
    }
}

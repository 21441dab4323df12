use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the soul registry.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (SOUL_* prefix)
/// 3. Config file (~/.config/soul-registry/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the SQLite store.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: SOUL_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/soul-registry/registry.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,

    /// Address the HTTP surface binds to.
    ///
    /// Can be set via:
    /// - ENV: SOUL_LISTEN_ADDR
    /// - Config: listen_addr = "0.0.0.0:7432"
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Feature vector length every record must match.
    ///
    /// Fixed at configuration time; registering a vector of any other
    /// length is rejected as a dimension mismatch.
    #[serde(default = "default_dimension")]
    pub dimension: usize,

    /// Suffix the naming convention uses to bridge registries
    /// (npm `left-pad` ↔ crate `left-pad-soul`).
    #[serde(default = "default_soul_suffix")]
    pub soul_suffix: String,

    /// Capacity of the read-through resolution cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            listen_addr: default_listen_addr(),
            dimension: default_dimension(),
            soul_suffix: default_soul_suffix(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/soul-registry/config.toml
    /// Reads environment variables with SOUL_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("soul");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.database_path = db_path;
        Ok(config)
    }
}

/// Get the default store path.
///
/// Returns: ~/.local/share/soul-registry/registry.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soul-registry")
        .join("registry.db")
}

fn default_listen_addr() -> String {
    "127.0.0.1:7432".to_string()
}

fn default_dimension() -> usize {
    7
}

fn default_soul_suffix() -> String {
    "-soul".to_string()
}

fn default_cache_capacity() -> usize {
    1024
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/soul-registry/config.toml
/// - macOS: ~/Library/Application Support/soul-registry/config.toml
/// - Windows: %APPDATA%\soul-registry\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soul-registry")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Soul Registry Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (SOUL_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite store
#
# Holds every package record under its namespace key plus the soul:
# content index.
#
# Can also be set via:
# - CLI: soulreg --db /custom/path.db stats
# - Environment: SOUL_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/registry.db"

# Address the HTTP surface binds to when running `soulreg serve`
#
# Can also be set via:
# - Environment: SOUL_LISTEN_ADDR=0.0.0.0:7432
#listen_addr = "127.0.0.1:7432"

# Feature vector length, fixed for the whole registry
#
# Every registered record must carry exactly this many components;
# changing it on a populated store makes existing records uncomparable.
#dimension = 7

# Naming-convention suffix bridging npm and crate registries
# (npm "left-pad" pairs with crate "left-pad-soul")
#soul_suffix = "-soul"

# Capacity of the in-process resolution cache
#cache_capacity = 1024
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert_eq!(config.dimension, 7);
        assert_eq!(config.soul_suffix, "-soul");
        assert_eq!(config.cache_capacity, 1024);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(custom_path.clone());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }
}

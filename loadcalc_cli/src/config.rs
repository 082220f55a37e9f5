//! CLI settings loaded from an optional TOML file.
//!
//! ```toml
//! show_hints = true
//! reveal_after_attempts = 3
//! snapshot_path = "loadcalc-session.json"
//! log_filter = "warn"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "loadcalc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allow `?` to show the worked hint
    pub show_hints: bool,
    /// Reveal the answer after this many rejections; 0 never reveals
    pub reveal_after_attempts: u32,
    /// Where walkthrough progress is saved
    pub snapshot_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            show_hints: true,
            reveal_after_attempts: 3,
            snapshot_path: PathBuf::from("loadcalc-session.json"),
            log_filter: "warn".to_string(),
        }
    }
}

impl Config {
    /// Load from `path`, or from [`DEFAULT_CONFIG_FILE`] if it exists.
    ///
    /// An explicit path must exist. With no file at all, defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !local.exists() {
                    return Ok(Config::default());
                }
                local
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Config::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn parse(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse("show_hints = false\nreveal_after_attempts = 0\n").unwrap();
        assert!(!config.show_hints);
        assert_eq!(config.reveal_after_attempts, 0);
        assert_eq!(config.snapshot_path, PathBuf::from("loadcalc-session.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_malformed_is_error() {
        assert!(Config::parse("show_hints = \"sometimes\"").is_err());
        assert!(Config::parse("this is not toml").is_err());
    }

    #[test]
    fn test_missing_explicit_path() {
        let path = std::env::temp_dir().join("loadcalc_missing_config.toml");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Read { .. })));
    }
}

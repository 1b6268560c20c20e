//! Tournament configuration, read from an optional TOML file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rating given to competitors added by hand without one
pub const DEFAULT_RATING: u32 = 1200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("total_rounds must be at least 1")]
    NoRounds,
}

/// Tournament configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Name shown on reports
    pub name: String,
    pub total_rounds: u32,
    pub default_rating: u32,
    /// Directory holding saved tournaments
    pub data_dir: PathBuf,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            name: "Chess Tournament".to_string(),
            total_rounds: 5,
            default_rating: DEFAULT_RATING,
            data_dir: PathBuf::from("tournament_data"),
        }
    }
}

impl TournamentConfig {
    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        if config.total_rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        Ok(config)
    }
}

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
pub const DEFAULT_MODEL: &str = "qwen3:1.7b";
const DEFAULT_CONFIG_PATH: &str = "config/chatterm.toml";

/// Startup configuration: the backend base address and the model used until
/// the user picks another one. Read once at startup, never persisted back.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub default_model: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    backend_url: Option<String>,
    default_model: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from an explicit path, or from the default location. A missing
    /// file at the default location means defaults; an explicit path that
    /// does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return read_config(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        match read_config(default_path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("Configuration file not found; using defaults");
                Ok(Self::default())
            }
            Err(other) => Err(other),
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading configuration file");
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: RawConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(AppConfig {
        backend_url: parsed
            .backend_url
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
        default_model: parsed
            .default_model
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
    })
}

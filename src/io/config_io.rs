use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Resolve the config path: explicit flag, then $TIDEMARK_CONFIG, then the
/// platform config dir.
pub fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = flag {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var("TIDEMARK_CONFIG") {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", "tidemark")
        .map(|dirs| dirs.config_dir().join("tidemark.toml"))
}

/// Load the config. A missing file (or no resolvable path) yields defaults;
/// only an unreadable or malformed file is an error.
pub fn load_config(flag: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match config_path(flag) {
        Some(p) => p,
        None => return Ok(Config::default()),
    };
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    let config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

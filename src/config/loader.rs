use anyhow::{Context, Result};
use dirs::home_dir;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

use super::builder::ConfigBuilder;
use super::environment::env_layer;
use super::types::ConfigLayer;
use super::Config;

/// Replaces the first `~` in `path` with the current user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match home_dir() {
        Some(home) if path.contains('~') => {
            PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1))
        }
        _ => PathBuf::from(path),
    }
}

/// Loads the YAML configuration file at `path`.
///
/// A path that cannot be read yields an empty layer; only a file that exists
/// and fails to decode is an error.
pub fn load_file(path: &str) -> Result<ConfigLayer> {
    let path = expand_home(path);

    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "configuration file not read");
            return Ok(ConfigLayer::default());
        }
    };

    if contents.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }

    let layer: Option<ConfigLayer> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed parsing YAML config at {}", path.display()))?;

    Ok(layer.unwrap_or_default())
}

impl Config {
    /// Resolves credentials and host from `args`, the environment and the
    /// file at `config_path`.
    ///
    /// The file and the environment are best-effort: a decode failure is
    /// logged and that source is treated as empty.
    pub fn load(args: &ConfigLayer, config_path: &str) -> Result<ConfigBuilder> {
        let file = load_file(config_path).unwrap_or_else(|err| {
            warn!("ignoring configuration file: {err:#}");
            ConfigLayer::default()
        });
        let env = env_layer();

        Ok(ConfigBuilder::resolve(args, &env, &file))
    }
}

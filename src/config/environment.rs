use anyhow::{Result, anyhow};
use std::env;
use tracing::warn;

use super::constants::{ALIAS_ENV_VAR, SECRET_ENV_VAR, TOKEN_ENV_VAR};
use super::types::ConfigLayer;

/// Reads the credential environment variables.
///
/// There is no host variable; the host can only come from arguments or the
/// configuration file. A variable that cannot be read is treated as unset so
/// the other layers still resolve that field.
pub fn env_layer() -> ConfigLayer {
    ConfigLayer {
        host: None,
        alias: env_credential(ALIAS_ENV_VAR),
        token: env_credential(TOKEN_ENV_VAR),
        secret: env_credential(SECRET_ENV_VAR),
    }
}

fn env_credential(key: &str) -> Option<String> {
    env_string(key).unwrap_or_else(|err| {
        warn!("ignoring environment variable: {err:#}");
        None
    })
}

pub fn env_string(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(anyhow!("{key} contains invalid UTF-8")),
    }
}

use std::fmt;

use serde::Deserialize;

use crate::report::Report;

use super::constants::DEFAULT_API_HOST;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: Option<String>,
    pub credentials: Credentials,
    pub verbose: bool,
    pub report: Report,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub alias: String,
    pub token: String,
    pub secret: String,
}

/// One partially-populated configuration source.
///
/// The YAML file deserializes straight into this; the environment and the
/// command line are mapped onto it so all three layers merge the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub host: Option<String>,
    pub alias: Option<String>,
    pub token: Option<String>,
    pub secret: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Arguments,
    Environment,
    File,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Arguments => write!(f, "arguments"),
            Source::Environment => write!(f, "environment"),
            Source::File => write!(f, "configuration file"),
        }
    }
}

impl Source {
    /// Whether this source is allowed to set the API host.
    pub fn provides_host(self) -> bool {
        !matches!(self, Source::Environment)
    }
}

impl Config {
    /// The API base URL, with `https://` assumed when the host has no scheme.
    pub fn api_base_url(&self) -> String {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_API_HOST);

        let base = if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{host}")
        };
        base.trim_end_matches('/').to_string()
    }
}

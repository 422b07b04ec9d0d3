//! Configuration management for maxreport.
//!
//! Settings come from three layers, resolved per field:
//! - command-line arguments
//! - environment variables (`ALIAS`, `TOKEN`, `SECRET`; never the host)
//! - an optional YAML file, `~/.maxcdn.yml` by default

mod builder;
mod constants;
mod defaults;
mod environment;
mod loader;
mod types;
mod validation;

pub use constants::DEFAULT_CONFIG_PATH;
pub use defaults::default_user_agent;
pub use types::{Config, ConfigLayer, Credentials};

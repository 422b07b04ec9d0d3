use tracing::debug;

use crate::report::Report;

use super::types::{Config, ConfigLayer, Credentials, Source};

/// Merges configuration layers into a [`Config`].
///
/// Layers are applied lowest precedence first; a later layer only replaces a
/// field when it carries a non-empty value for it.
#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) host: Option<String>,
    pub(super) credentials: Credentials,
    pub(super) verbose: bool,
    pub(super) report: Report,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            host: None,
            credentials: Credentials::default(),
            verbose: false,
            report: Report::default(),
        }
    }

    /// Resolves each field to the first non-empty value among arguments,
    /// environment and file, in that order.
    pub fn resolve(args: &ConfigLayer, env: &ConfigLayer, file: &ConfigLayer) -> Self {
        Self::new()
            .with_layer(file, Source::File)
            .with_layer(env, Source::Environment)
            .with_layer(args, Source::Arguments)
    }

    pub fn with_layer(mut self, layer: &ConfigLayer, source: Source) -> Self {
        if let Some(alias) = non_empty(&layer.alias) {
            debug!(%source, "alias resolved");
            self.credentials.alias = alias.to_string();
        }
        if let Some(token) = non_empty(&layer.token) {
            debug!(%source, "token resolved");
            self.credentials.token = token.to_string();
        }
        if let Some(secret) = non_empty(&layer.secret) {
            debug!(%source, "secret resolved");
            self.credentials.secret = secret.to_string();
        }
        if source.provides_host() {
            if let Some(host) = non_empty(&layer.host) {
                debug!(%source, host, "host resolved");
                self.host = Some(host.to_string());
            }
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = report;
        self
    }

    pub fn build(self) -> Config {
        Config {
            host: self.host,
            credentials: self.credentials,
            verbose: self.verbose,
            report: self.report,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

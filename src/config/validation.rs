use super::types::Config;

/// Describes every missing credential, one line each, alias first.
///
/// An empty string means the configuration is usable. Callers decide what
/// to do with a non-empty result.
pub fn validate(config: &Config) -> String {
    let credentials = &config.credentials;
    let mut out = String::new();

    for (name, value) in [
        ("alias", &credentials.alias),
        ("token", &credentials.token),
        ("secret", &credentials.secret),
    ] {
        if value.is_empty() {
            out.push_str(&format!("- missing {name} value\n"));
        }
    }

    out
}

impl Config {
    pub fn validate(&self) -> String {
        validate(self)
    }
}

pub const DEFAULT_CONFIG_PATH: &str = "~/.maxcdn.yml";
pub const DEFAULT_API_HOST: &str = "https://rws.maxcdn.com";

pub const ALIAS_ENV_VAR: &str = "ALIAS";
pub const TOKEN_ENV_VAR: &str = "TOKEN";
pub const SECRET_ENV_VAR: &str = "SECRET";

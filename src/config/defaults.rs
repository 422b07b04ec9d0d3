use crate::report::Report;

use super::types::{Config, Credentials};

pub fn default_user_agent() -> String {
    format!("maxreport/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: None,
            credentials: Credentials::default(),
            verbose: false,
            report: Report::default(),
        }
    }
}

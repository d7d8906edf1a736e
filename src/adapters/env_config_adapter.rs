//! Environment-variable configuration adapter.
//!
//! `(section, key)` maps to the upper-cased variable `SECTION_KEY`, so
//! `("forex", "username")` reads `FOREX_USERNAME`. Variables are captured once
//! at construction.

use crate::ports::config_port::ConfigPort;
use std::collections::HashMap;

pub struct EnvConfigAdapter {
    vars: HashMap<String, String>,
}

impl EnvConfigAdapter {
    /// Loads `.env` from the working directory (if present) into the process
    /// environment, then snapshots it.
    pub fn load() -> Self {
        match dotenv::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
        }
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn var_name(section: &str, key: &str) -> String {
        format!("{}_{}", section, key).to_uppercase()
    }
}

impl ConfigPort for EnvConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.vars.get(&Self::var_name(section, key)).cloned()
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.get_string(section, key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

//! Broker connection settings and session status notifications.

use crate::domain::error::FxFetchError;
use crate::ports::config_port::ConfigPort;
use std::fmt;

pub const CONFIG_SECTION: &str = "forex";
pub const DEFAULT_CONNECTION: &str = "Demo";

/// Credentials and endpoint for one broker login.
///
/// Loaded once through a [`ConfigPort`] and never mutated. Empty fields are
/// tolerated at load time and rejected by [`ConnectionConfig::validate`]
/// before any network I/O.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub username: String,
    pub password: String,
    pub url: String,
    pub connection: String,
}

impl ConnectionConfig {
    pub fn new(username: &str, password: &str, url: &str, connection: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            url: url.to_string(),
            connection: connection.to_string(),
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let get = |key: &str| config.get_string(CONFIG_SECTION, key).unwrap_or_default();
        Self {
            username: get("username"),
            password: get("password"),
            url: get("url"),
            connection: config
                .get_string(CONFIG_SECTION, "connection")
                .unwrap_or_else(|| DEFAULT_CONNECTION.to_string()),
        }
    }

    /// Fails on the first empty field, in username, password, url, connection order.
    pub fn validate(&self) -> Result<(), FxFetchError> {
        let fields = [
            ("username", &self.username),
            ("password", &self.password),
            ("url", &self.url),
            ("connection", &self.connection),
        ];
        for (key, value) in fields {
            if value.trim().is_empty() {
                return Err(FxFetchError::ConfigMissing {
                    section: CONFIG_SECTION.into(),
                    key: key.into(),
                });
            }
        }
        Ok(())
    }
}

// Keeps the password out of logs.
impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("url", &self.url)
            .field("connection", &self.connection)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
    SessionLost,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Connecting => "CONNECTING",
            SessionStatus::Connected => "CONNECTED",
            SessionStatus::Disconnecting => "DISCONNECTING",
            SessionStatus::Disconnected => "DISCONNECTED",
            SessionStatus::SessionLost => "SESSION_LOST",
        };
        f.write_str(label)
    }
}

/// Invoked by a trading adapter on every session status transition.
pub type StatusCallback = fn(SessionStatus);

pub fn log_status_change(status: SessionStatus) {
    tracing::info!(%status, "Trading session status changed");
}

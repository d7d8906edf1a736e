//! Blocking HTTP adapter for the broker's trading gateway.
//!
//! Endpoints, relative to the configured URL:
//! - `POST /login` with `{"username", "password", "connection"}`, answering `{"session_id"}`
//! - `GET /history?instrument=&timeframe=&from=&to=`, answering `{"bars": [...]}`
//! - `POST /logout`
//!
//! History and logout carry the session id as a bearer token.

use crate::domain::connection::{CONFIG_SECTION, ConnectionConfig, SessionStatus, StatusCallback};
use crate::domain::error::FxFetchError;
use crate::domain::history_query::HistoryQuery;
use crate::domain::price_bar::{BAR_DATE_FORMAT, PriceBar};
use crate::ports::config_port::ConfigPort;
use crate::ports::trading_port::TradingPort;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    connection: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    session_id: String,
}

#[derive(Deserialize)]
struct HistoryResponse {
    bars: Vec<PriceBar>,
}

/// Authenticated gateway session.
#[derive(Debug, Clone)]
pub struct HttpSession {
    base_url: String,
    session_id: String,
    on_status: StatusCallback,
}

impl HttpSession {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

pub struct HttpTradingAdapter {
    client: Client,
}

impl HttpTradingAdapter {
    pub fn new(timeout: Duration) -> Result<Self, FxFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FxFetchError::Connection {
                reason: format!("http client build failed: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Request timeout from `[forex] timeout_secs`.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FxFetchError> {
        Self::new(timeout_from_config(config))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn request_session(
        &self,
        base_url: &str,
        config: &ConnectionConfig,
    ) -> Result<String, FxFetchError> {
        let body = LoginRequest {
            username: &config.username,
            password: &config.password,
            connection: &config.connection,
        };
        let resp = self
            .client
            .post(format!("{base_url}/login"))
            .json(&body)
            .send()
            .map_err(|e| FxFetchError::Connection {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FxFetchError::Authentication {
                reason: describe_failure(resp),
            });
        }
        if !status.is_success() {
            return Err(FxFetchError::Connection {
                reason: describe_failure(resp),
            });
        }

        let login: LoginResponse = resp.json().map_err(|e| FxFetchError::Connection {
            reason: format!("invalid login response: {e}"),
        })?;
        Ok(login.session_id)
    }
}

fn describe_failure(resp: Response) -> String {
    let status = resp.status();
    match resp.text() {
        Ok(body) if !body.trim().is_empty() => format!("HTTP {status}: {}", body.trim()),
        _ => format!("HTTP {status}"),
    }
}

impl TradingPort for HttpTradingAdapter {
    type Session = HttpSession;

    fn login(
        &self,
        config: &ConnectionConfig,
        on_status: StatusCallback,
    ) -> Result<HttpSession, FxFetchError> {
        let base_url = config.url.trim_end_matches('/').to_string();

        on_status(SessionStatus::Connecting);
        match self.request_session(&base_url, config) {
            Ok(session_id) => {
                on_status(SessionStatus::Connected);
                Ok(HttpSession {
                    base_url,
                    session_id,
                    on_status,
                })
            }
            Err(e) => {
                on_status(SessionStatus::Disconnected);
                Err(e)
            }
        }
    }

    fn logout(&self, session: &HttpSession) -> Result<(), FxFetchError> {
        (session.on_status)(SessionStatus::Disconnecting);
        let result = self
            .client
            .post(session.endpoint("logout"))
            .bearer_auth(&session.session_id)
            .send()
            .map_err(|e| FxFetchError::Connection {
                reason: e.to_string(),
            })
            .and_then(|resp| {
                if resp.status().is_success() {
                    Ok(())
                } else {
                    Err(FxFetchError::Connection {
                        reason: describe_failure(resp),
                    })
                }
            });
        (session.on_status)(SessionStatus::Disconnected);
        result
    }

    fn get_history(
        &self,
        session: &HttpSession,
        query: &HistoryQuery,
    ) -> Result<Vec<PriceBar>, FxFetchError> {
        let query_error = |reason: String| FxFetchError::Query {
            ticker: query.ticker.clone(),
            timeframe: query.timeframe.clone(),
            reason,
        };

        let from = query.date_from.format(BAR_DATE_FORMAT).to_string();
        let to = query.date_to.format(BAR_DATE_FORMAT).to_string();
        let resp = self
            .client
            .get(session.endpoint("history"))
            .bearer_auth(&session.session_id)
            .query(&[
                ("instrument", query.ticker.as_str()),
                ("timeframe", query.timeframe.as_str()),
                ("from", from.as_str()),
                ("to", to.as_str()),
            ])
            .send()
            .map_err(|e| query_error(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            (session.on_status)(SessionStatus::SessionLost);
        }
        if !status.is_success() {
            return Err(query_error(describe_failure(resp)));
        }

        let history: HistoryResponse = resp
            .json()
            .map_err(|e| query_error(format!("invalid history response: {e}")))?;
        tracing::debug!(rows = history.bars.len(), "History response decoded");
        Ok(history.bars)
    }
}

/// At least one second; defaults to [`DEFAULT_TIMEOUT_SECS`].
fn timeout_from_config(config: &dyn ConfigPort) -> Duration {
    let secs = config.get_int(CONFIG_SECTION, "timeout_secs", DEFAULT_TIMEOUT_SECS as i64);
    Duration::from_secs(secs.max(1) as u64)
}

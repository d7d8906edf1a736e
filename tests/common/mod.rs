#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use fxfetch::domain::connection::{ConnectionConfig, SessionStatus, StatusCallback};
use fxfetch::domain::error::FxFetchError;
use fxfetch::domain::history_query::HistoryQuery;
pub use fxfetch::domain::price_bar::PriceBar;
use fxfetch::ports::trading_port::TradingPort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSession {
    pub id: usize,
}

/// Records every call; bars and failures are configured per timeframe.
pub struct MockTradingPort {
    pub bars: HashMap<String, Vec<PriceBar>>,
    pub query_errors: HashMap<String, String>,
    pub login_error: Option<String>,
    pub logout_error: Option<String>,
    pub calls: RefCell<Vec<String>>,
    next_id: Cell<usize>,
}

impl MockTradingPort {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            query_errors: HashMap::new(),
            login_error: None,
            logout_error: None,
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
        }
    }

    pub fn with_bars(mut self, timeframe: &str, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(timeframe.to_string(), bars);
        self
    }

    pub fn with_query_error(mut self, timeframe: &str, reason: &str) -> Self {
        self.query_errors
            .insert(timeframe.to_string(), reason.to_string());
        self
    }

    pub fn with_login_error(mut self, reason: &str) -> Self {
        self.login_error = Some(reason.to_string());
        self
    }

    pub fn with_logout_error(mut self, reason: &str) -> Self {
        self.logout_error = Some(reason.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

impl TradingPort for MockTradingPort {
    type Session = MockSession;

    fn login(
        &self,
        config: &ConnectionConfig,
        on_status: StatusCallback,
    ) -> Result<MockSession, FxFetchError> {
        self.calls
            .borrow_mut()
            .push(format!("login {} {}", config.username, config.connection));
        on_status(SessionStatus::Connecting);
        if let Some(reason) = &self.login_error {
            on_status(SessionStatus::Disconnected);
            return Err(FxFetchError::Authentication {
                reason: reason.clone(),
            });
        }
        on_status(SessionStatus::Connected);
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        Ok(MockSession { id })
    }

    fn logout(&self, session: &MockSession) -> Result<(), FxFetchError> {
        self.calls
            .borrow_mut()
            .push(format!("logout {}", session.id));
        match &self.logout_error {
            Some(reason) => Err(FxFetchError::Connection {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }

    fn get_history(
        &self,
        _session: &MockSession,
        query: &HistoryQuery,
    ) -> Result<Vec<PriceBar>, FxFetchError> {
        self.calls
            .borrow_mut()
            .push(format!("history {} {}", query.ticker, query.timeframe));
        if let Some(reason) = self.query_errors.get(&query.timeframe) {
            return Err(FxFetchError::Query {
                ticker: query.ticker.clone(),
                timeframe: query.timeframe.clone(),
                reason: reason.clone(),
            });
        }
        Ok(self.bars.get(&query.timeframe).cloned().unwrap_or_default())
    }
}

pub fn valid_config() -> ConnectionConfig {
    ConnectionConfig::new("user", "pass", "https://fx.example.com", "Demo")
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// Hourly bars starting at `start`, with prices drifting by a pip per bar.
pub fn hourly_bars(start: NaiveDateTime, count: usize) -> Vec<PriceBar> {
    (0..count)
        .map(|i| {
            let base = 147.25 + i as f64 * 0.01;
            PriceBar {
                date: start + chrono::Duration::hours(i as i64),
                bid_open: base,
                bid_high: base + 0.08,
                bid_low: base - 0.05,
                bid_close: base + 0.013,
                ask_open: base + 0.02,
                ask_high: base + 0.1,
                ask_low: base - 0.03,
                ask_close: base + 0.033,
                volume: 1_000 + i as i64 * 7,
            }
        })
        .collect()
}

//! Session lifecycle around a [`TradingPort`] and the fetch-and-save operation.
//!
//! A [`SessionManager`] is either closed or active. [`SessionManager::open`]
//! logs in and holds the session, [`SessionManager::close`] logs out and
//! always clears it. Prefer [`SessionManager::scoped`], whose guard closes the
//! session when dropped, so logout runs on every exit path.

use crate::adapters::csv_adapter;
use crate::domain::connection::{ConnectionConfig, log_status_change};
use crate::domain::error::FxFetchError;
use crate::domain::history_query::HistoryQuery;
use crate::domain::output_path::{DEFAULT_OUTPUT_DIR, default_output_path};
use crate::domain::price_bar::PriceBar;
use crate::ports::trading_port::TradingPort;
use chrono::{Local, NaiveDateTime};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Bars written by one fetch, with the file they were written to.
#[derive(Debug, Clone)]
pub struct SavedHistory {
    pub query: HistoryQuery,
    pub bars: Vec<PriceBar>,
    pub path: PathBuf,
}

impl SavedHistory {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

pub struct SessionManager<T: TradingPort> {
    config: ConnectionConfig,
    port: T,
    session: Option<T::Session>,
    output_dir: PathBuf,
}

impl<T: TradingPort> SessionManager<T> {
    pub fn new(config: ConnectionConfig, port: T) -> Self {
        Self {
            config,
            port,
            session: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn port(&self) -> &T {
        &self.port
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Validates the connection config, then logs in.
    pub fn open(&mut self) -> Result<&T::Session, FxFetchError> {
        if self.session.is_some() {
            return Err(FxFetchError::AlreadyConnected);
        }
        self.config.validate()?;

        info!(
            username = %self.config.username,
            url = %self.config.url,
            connection = %self.config.connection,
            "Logging in"
        );
        let session = self.port.login(&self.config, log_status_change)?;
        Ok(&*self.session.insert(session))
    }

    /// Logs out if a session is held. Logout failures are only logged.
    pub fn close(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match self.port.logout(&session) {
            Ok(()) => info!("Successfully logged out"),
            Err(e) => warn!(error = %e, "Exception during logout"),
        }
    }

    /// Opens a session that is closed when the returned guard is dropped.
    pub fn scoped(&mut self) -> Result<SessionGuard<'_, T>, FxFetchError> {
        self.open()?;
        Ok(SessionGuard { manager: self })
    }

    /// Fetches `lookback_days` of bars ending now and writes them to disk.
    ///
    /// Returns `Ok(None)` when the broker has no bars in range; nothing is
    /// written in that case. Without `output_path` the file goes under the
    /// output directory with a name derived from the query.
    pub fn fetch_and_save(
        &self,
        ticker: &str,
        timeframe: &str,
        lookback_days: u32,
        output_path: Option<&Path>,
    ) -> Result<Option<SavedHistory>, FxFetchError> {
        self.fetch_and_save_at(
            Local::now().naive_local(),
            ticker,
            timeframe,
            lookback_days,
            output_path,
        )
    }

    /// [`SessionManager::fetch_and_save`] with an explicit "now".
    pub fn fetch_and_save_at(
        &self,
        now: NaiveDateTime,
        ticker: &str,
        timeframe: &str,
        lookback_days: u32,
        output_path: Option<&Path>,
    ) -> Result<Option<SavedHistory>, FxFetchError> {
        let session = self.session.as_ref().ok_or(FxFetchError::NotConnected)?;

        let query = HistoryQuery::lookback(ticker, timeframe, lookback_days, now)?;
        info!("Fetching {query}");

        let bars = self.port.get_history(session, &query)?;
        if bars.is_empty() {
            info!("No data retrieved for {} {}", ticker, timeframe);
            return Ok(None);
        }

        let path = match output_path {
            Some(p) => p.to_path_buf(),
            None => default_output_path(&self.output_dir, &query)?,
        };
        csv_adapter::write_bars(&path, &bars)?;

        info!("Data saved to {}", path.display());
        match std::path::absolute(&path) {
            Ok(abs) => info!("Absolute path: {}", abs.display()),
            Err(e) => warn!(error = %e, "Could not resolve absolute path"),
        }

        Ok(Some(SavedHistory { query, bars, path }))
    }
}

/// Active session borrowed from a [`SessionManager`]; logs out on drop.
pub struct SessionGuard<'a, T: TradingPort> {
    manager: &'a mut SessionManager<T>,
}

impl<T: TradingPort> Deref for SessionGuard<'_, T> {
    type Target = SessionManager<T>;

    fn deref(&self) -> &Self::Target {
        self.manager
    }
}

impl<T: TradingPort> DerefMut for SessionGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.manager
    }
}

impl<T: TradingPort> Drop for SessionGuard<'_, T> {
    fn drop(&mut self) {
        self.manager.close();
    }
}

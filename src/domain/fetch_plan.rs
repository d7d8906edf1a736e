//! What a run fetches: one ticker over several timeframes.

use crate::domain::error::FxFetchError;
use crate::domain::output_path::DEFAULT_OUTPUT_DIR;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const PLAN_SECTION: &str = "fetch";
pub const DEFAULT_TICKER: &str = "USD/JPY";
pub const DEFAULT_TIMEFRAMES: [&str; 2] = ["m1", "H1"];
pub const DEFAULT_LOOKBACK_DAYS: u32 = 45;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    pub ticker: String,
    pub timeframes: Vec<String>,
    pub lookback_days: u32,
    pub output_dir: PathBuf,
}

impl Default for FetchPlan {
    fn default() -> Self {
        Self {
            ticker: DEFAULT_TICKER.to_string(),
            timeframes: DEFAULT_TIMEFRAMES.iter().map(|s| s.to_string()).collect(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl FetchPlan {
    /// Reads the `[fetch]` section, falling back to defaults for absent keys.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FxFetchError> {
        let defaults = Self::default();

        let ticker = config
            .get_string(PLAN_SECTION, "ticker")
            .map(|t| t.trim().to_string())
            .unwrap_or(defaults.ticker);

        let timeframes = match config.get_string(PLAN_SECTION, "timeframes") {
            Some(list) => parse_timeframes(&list),
            None => defaults.timeframes,
        };

        let days = config.get_int(PLAN_SECTION, "days_back", i64::from(DEFAULT_LOOKBACK_DAYS));
        let lookback_days = u32::try_from(days).map_err(|_| FxFetchError::ConfigInvalid {
            section: PLAN_SECTION.into(),
            key: "days_back".into(),
            reason: format!("must be a non-negative day count, got {days}"),
        })?;

        let output_dir = config
            .get_string(PLAN_SECTION, "output_dir")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);

        let plan = Self {
            ticker,
            timeframes,
            lookback_days,
            output_dir,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), FxFetchError> {
        if self.ticker.is_empty() {
            return Err(FxFetchError::ConfigInvalid {
                section: PLAN_SECTION.into(),
                key: "ticker".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.timeframes.is_empty() {
            return Err(FxFetchError::ConfigInvalid {
                section: PLAN_SECTION.into(),
                key: "timeframes".into(),
                reason: "at least one timeframe is required".into(),
            });
        }
        Ok(())
    }
}

/// Splits a comma-separated list, dropping blanks.
pub fn parse_timeframes(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

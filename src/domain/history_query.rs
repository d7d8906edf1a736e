//! Resolved history query: ticker, timeframe and an absolute date range.

use crate::domain::error::FxFetchError;
use crate::domain::fetch_plan::PLAN_SECTION;
use chrono::{NaiveDateTime, TimeDelta};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    pub ticker: String,
    pub timeframe: String,
    pub date_from: NaiveDateTime,
    pub date_to: NaiveDateTime,
}

impl HistoryQuery {
    /// Range is `(now - lookback_days, now)`.
    ///
    /// A window reaching past the earliest representable date is a
    /// `ConfigInvalid` error on `[fetch] days_back`.
    pub fn lookback(
        ticker: &str,
        timeframe: &str,
        lookback_days: u32,
        now: NaiveDateTime,
    ) -> Result<Self, FxFetchError> {
        let date_from = TimeDelta::try_days(i64::from(lookback_days))
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(|| FxFetchError::ConfigInvalid {
                section: PLAN_SECTION.into(),
                key: "days_back".into(),
                reason: format!("{lookback_days} days before {now} is out of range"),
            })?;
        Ok(Self {
            ticker: ticker.to_string(),
            timeframe: timeframe.to_string(),
            date_from,
            date_to: now,
        })
    }
}

impl fmt::Display for HistoryQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} from {} to {}",
            self.ticker,
            self.timeframe,
            self.date_from.format("%Y-%m-%d"),
            self.date_to.format("%Y-%m-%d")
        )
    }
}

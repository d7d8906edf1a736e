//! Bid/ask price bar as returned by the broker history call.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used on the wire and in output files.
pub const BAR_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    #[serde(rename = "Date", with = "bar_date")]
    pub date: NaiveDateTime,
    #[serde(rename = "BidOpen")]
    pub bid_open: f64,
    #[serde(rename = "BidHigh")]
    pub bid_high: f64,
    #[serde(rename = "BidLow")]
    pub bid_low: f64,
    #[serde(rename = "BidClose")]
    pub bid_close: f64,
    #[serde(rename = "AskOpen")]
    pub ask_open: f64,
    #[serde(rename = "AskHigh")]
    pub ask_high: f64,
    #[serde(rename = "AskLow")]
    pub ask_low: f64,
    #[serde(rename = "AskClose")]
    pub ask_close: f64,
    #[serde(rename = "Volume")]
    pub volume: i64,
}

impl PriceBar {
    /// Field names in the order the broker emits them.
    pub const COLUMNS: [&'static str; 10] = [
        "Date", "BidOpen", "BidHigh", "BidLow", "BidClose", "AskOpen", "AskHigh", "AskLow",
        "AskClose", "Volume",
    ];

    /// Renders the bar as output-file fields, prefixed by its row index.
    pub fn to_record(&self, index: usize) -> Vec<String> {
        vec![
            index.to_string(),
            self.date.format(BAR_DATE_FORMAT).to_string(),
            self.bid_open.to_string(),
            self.bid_high.to_string(),
            self.bid_low.to_string(),
            self.bid_close.to_string(),
            self.ask_open.to_string(),
            self.ask_high.to_string(),
            self.ask_low.to_string(),
            self.ask_close.to_string(),
            self.volume.to_string(),
        ]
    }
}

pub(crate) mod bar_date {
    use super::BAR_DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(BAR_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, BAR_DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

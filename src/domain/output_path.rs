//! Output file naming.

use crate::domain::history_query::HistoryQuery;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "FX";
pub const OUTPUT_EXTENSION: &str = "csv";

/// Removes path separators so the value is safe as a single file-name component.
pub fn strip_separators(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '/' | '\\')).collect()
}

/// `<ticker>_<timeframe>_<YYYYMMDD>_to_<YYYYMMDD>.csv`
pub fn output_file_name(query: &HistoryQuery) -> String {
    format!(
        "{}_{}_{}_to_{}.{}",
        strip_separators(&query.ticker),
        strip_separators(&query.timeframe),
        query.date_from.format("%Y%m%d"),
        query.date_to.format("%Y%m%d"),
        OUTPUT_EXTENSION
    )
}

/// Joins the derived file name onto `output_dir`, creating the directory if absent.
pub fn default_output_path(output_dir: &Path, query: &HistoryQuery) -> std::io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    Ok(output_dir.join(output_file_name(query)))
}

//! CSV file output for fetched bars.

use crate::domain::error::FxFetchError;
use crate::domain::price_bar::PriceBar;
use std::path::Path;

/// Writes a header row and one row per bar, truncating any existing file.
///
/// The first column has an empty header and carries the 0-based row index.
pub fn write_bars(path: &Path, bars: &[PriceBar]) -> Result<(), FxFetchError> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec![""];
    header.extend(PriceBar::COLUMNS);
    wtr.write_record(&header)?;

    for (index, bar) in bars.iter().enumerate() {
        wtr.write_record(bar.to_record(index))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Reads a file produced by [`write_bars`], dropping the index column.
pub fn read_bars(path: &Path) -> Result<Vec<PriceBar>, FxFetchError> {
    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();

    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let bar: PriceBar = record.deserialize(Some(&headers))?;
        bars.push(bar);
    }
    Ok(bars)
}

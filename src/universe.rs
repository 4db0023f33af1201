//! Ticker universe loading from a constituents CSV (e.g. `sp_500_stocks.csv`).
//!
//! The file needs a `Ticker` column (header match is case-insensitive).
//! Symbols are trimmed and uppercased, blank cells are skipped, and
//! duplicates are dropped keeping the first occurrence.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, ScreenerError};
use crate::models::Symbol;

pub const TICKER_COLUMN: &str = "Ticker";

/// Load the universe from a CSV file on disk.
pub fn load_universe<P: AsRef<Path>>(path: P) -> Result<Vec<Symbol>> {
    let file = File::open(path.as_ref())?;
    let symbols = parse_universe(file)?;
    debug!(path = %path.as_ref().display(), symbols = symbols.len(), "universe loaded");
    Ok(symbols)
}

/// Parse a universe from any CSV reader.
pub fn parse_universe<R: Read>(reader: R) -> Result<Vec<Symbol>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.eq_ignore_ascii_case(TICKER_COLUMN))
        .ok_or_else(|| {
            ScreenerError::InvalidArgument(format!(
                "universe CSV has no '{}' column",
                TICKER_COLUMN
            ))
        })?;

    let mut seen = HashSet::new();
    let mut symbols = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let Some(cell) = record.get(column) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let symbol = cell.to_ascii_uppercase();
        if seen.insert(symbol.clone()) {
            symbols.push(symbol);
        }
    }

    Ok(symbols)
}

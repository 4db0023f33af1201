//! CSV report of finalized rows.
//!
//! The column set depends on which ranking mode produced the rows. Prices
//! and market caps are written as `$0.00`, returns and percentiles as `0.0%`,
//! the HQM score with two decimals. Missing values are written as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{Horizon, Row};
use crate::ranking::RankingMode;

/// What a report column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnValue {
    Ticker,
    Price,
    MarketCap,
    SharesToBuy,
    Return(Horizon),
    Percentile(Horizon),
    CompositeScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub header: String,
    pub value: ColumnValue,
}

impl Column {
    fn new(header: impl Into<String>, value: ColumnValue) -> Self {
        Self {
            header: header.into(),
            value,
        }
    }

    fn cell(&self, row: &Row) -> String {
        match self.value {
            ColumnValue::Ticker => row.symbol.clone(),
            ColumnValue::Price => dollars(row.quote.price),
            ColumnValue::MarketCap => dollars(row.quote.market_cap),
            ColumnValue::SharesToBuy => row.shares_to_buy.map(|s| s.to_string()).unwrap_or_default(),
            ColumnValue::Return(h) => percent(row.quote.change(h)),
            ColumnValue::Percentile(h) => percent(row.percentile(h)),
            ColumnValue::CompositeScore => row
                .composite_score
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
        }
    }
}

fn dollars(value: Option<f64>) -> String {
    value.map(|v| format!("${:.2}", v)).unwrap_or_default()
}

fn percent(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}%", v * 100.0)).unwrap_or_default()
}

/// The fixed column schema for rows produced by `mode`.
pub fn columns(mode: &RankingMode) -> Vec<Column> {
    match mode {
        RankingMode::EqualWeight => vec![
            Column::new("Ticker", ColumnValue::Ticker),
            Column::new("Stock Price", ColumnValue::Price),
            Column::new("Market Capitalization", ColumnValue::MarketCap),
            Column::new("Number of Shares to Buy", ColumnValue::SharesToBuy),
        ],
        RankingMode::TopN { metric, .. } => vec![
            Column::new("Ticker", ColumnValue::Ticker),
            Column::new("Price", ColumnValue::Price),
            Column::new(
                format!("{} Price Return", metric.label()),
                ColumnValue::Return(*metric),
            ),
            Column::new("Number of Shares to Buy", ColumnValue::SharesToBuy),
        ],
        RankingMode::Composite { horizons, .. } => {
            let mut cols = vec![
                Column::new("Ticker", ColumnValue::Ticker),
                Column::new("Price", ColumnValue::Price),
                Column::new("Number of Shares to Buy", ColumnValue::SharesToBuy),
            ];
            for &h in horizons {
                cols.push(Column::new(
                    format!("{} Price Return", h.label()),
                    ColumnValue::Return(h),
                ));
                cols.push(Column::new(
                    format!("{} Return Percentile", h.label()),
                    ColumnValue::Percentile(h),
                ));
            }
            cols.push(Column::new("HQM Score", ColumnValue::CompositeScore));
            cols
        }
    }
}

/// Write `rows` as CSV using the schema for `mode`.
pub fn write_csv<W: Write>(rows: &[Row], mode: &RankingMode, writer: W) -> Result<()> {
    let cols = columns(mode);
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(cols.iter().map(|c| c.header.as_str()))?;
    for row in rows {
        wtr.write_record(cols.iter().map(|c| c.cell(row)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file.
pub fn write_report<P: AsRef<Path>>(rows: &[Row], mode: &RankingMode, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_csv(rows, mode, file)
}

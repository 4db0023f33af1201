//! Equal-dollar allocation of a portfolio across ranked rows.

use tracing::debug;

use crate::error::{Result, ScreenerError};
use crate::models::Row;

/// Parse free-form portfolio size input such as `"1000000"`, `"$1,000,000"` or `" 2500.50 "`.
///
/// The result is always finite and strictly positive.
pub fn parse_portfolio_value(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    let cleaned: String = trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    let value: f64 = cleaned
        .trim()
        .parse()
        .map_err(|_| ScreenerError::InvalidPortfolioValue(format!("'{}' is not a number", trimmed)))?;
    validate_portfolio_value(value)?;
    Ok(value)
}

fn validate_portfolio_value(value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScreenerError::InvalidPortfolioValue(format!(
            "{} must be a positive amount",
            value
        )));
    }
    Ok(())
}

/// Split `portfolio_value` evenly across `rows` and set each row's share count.
///
/// `shares_to_buy = floor(position_size / price)` where
/// `position_size = portfolio_value / rows.len()`. Rows without a usable
/// price keep `shares_to_buy = None` but still take their slot in the split.
///
/// Returns [`ScreenerError::EmptyPortfolio`] instead of dividing by zero when
/// `rows` is empty.
pub fn allocate(mut rows: Vec<Row>, portfolio_value: f64) -> Result<Vec<Row>> {
    validate_portfolio_value(portfolio_value)?;
    if rows.is_empty() {
        return Err(ScreenerError::EmptyPortfolio);
    }

    let position_size = portfolio_value / rows.len() as f64;
    for row in rows.iter_mut() {
        row.shares_to_buy = row
            .quote
            .usable_price()
            .map(|price| (position_size / price).floor() as u64);
    }

    debug!(rows = rows.len(), position_size, "allocation complete");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Allocation summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationSummary {
    pub positions: usize,
    pub position_size: f64,
    pub invested: f64,
    pub cash_remaining: f64,
}

/// Summarize allocated rows against the portfolio they were sized for.
pub fn summarize(rows: &[Row], portfolio_value: f64) -> AllocationSummary {
    let invested = invested(rows);
    let position_size = if rows.is_empty() {
        0.0
    } else {
        portfolio_value / rows.len() as f64
    };
    AllocationSummary {
        positions: rows.len(),
        position_size,
        invested,
        cash_remaining: portfolio_value - invested,
    }
}

/// Total cost of the allocated shares at their quoted prices.
pub fn invested(rows: &[Row]) -> f64 {
    rows.iter()
        .filter_map(|r| Some(r.shares_to_buy? as f64 * r.quote.usable_price()?))
        .sum()
}

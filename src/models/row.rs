use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::quote::{Horizon, Quote, Symbol};

// ---------------------------------------------------------------------------
// Row - working unit passed between pipeline stages
// ---------------------------------------------------------------------------

/// A symbol and its quote, enriched by ranking and allocation.
///
/// Rows are created from fetched quotes, gain `percentiles` and
/// `composite_score` in the ranking stage and `shares_to_buy` in the
/// allocation stage. Stages take rows by value and hand them on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub symbol: Symbol,
    pub quote: Quote,
    /// Percentile-of-score per horizon, each in `[0, 1]`.
    #[serde(default)]
    pub percentiles: BTreeMap<Horizon, f64>,
    pub composite_score: Option<f64>,
    pub shares_to_buy: Option<u64>,
}

impl Row {
    pub fn new(symbol: impl Into<Symbol>, quote: Quote) -> Self {
        Self {
            symbol: symbol.into(),
            quote,
            percentiles: BTreeMap::new(),
            composite_score: None,
            shares_to_buy: None,
        }
    }

    pub fn percentile(&self, horizon: Horizon) -> Option<f64> {
        self.percentiles.get(&horizon).copied()
    }

    /// Replace a missing or non-finite change percent with `0.0` so the row
    /// can be ranked.
    pub(crate) fn normalize_missing(&mut self, horizon: Horizon) {
        let value = self.quote.change_percent.entry(horizon).or_insert(0.0);
        if !value.is_finite() {
            *value = 0.0;
        }
    }
}

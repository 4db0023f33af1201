//! Shared test fixtures for the screener integration tests.
//!
//! Provides an in-memory [`StaticProvider`] that serves canned quotes and
//! records every batch it was asked for, plus small row builders.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use momentum_screener::{Horizon, Quote, QuoteProvider, Result, Row, ScreenerError, Symbol};

/// Serves quotes from a map. Symbols not in the map are left out of the
/// response, like a provider with no data for them.
pub struct StaticProvider {
    quotes: HashMap<Symbol, Quote>,
    fail_on_batch: Option<usize>,
    calls: RefCell<Vec<Vec<Symbol>>>,
}

impl StaticProvider {
    pub fn new(quotes: Vec<(&str, Quote)>) -> Self {
        Self {
            quotes: quotes
                .into_iter()
                .map(|(s, q)| (s.to_string(), q))
                .collect(),
            fail_on_batch: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Make the provider fail on the given zero-based call.
    pub fn failing_on(mut self, batch: usize) -> Self {
        self.fail_on_batch = Some(batch);
        self
    }

    pub fn calls(&self) -> Vec<Vec<Symbol>> {
        self.calls.borrow().clone()
    }
}

impl QuoteProvider for StaticProvider {
    fn source_name(&self) -> &'static str {
        "static"
    }

    fn fetch(&self, batch: &[Symbol]) -> Result<HashMap<Symbol, Quote>> {
        let call = self.calls.borrow().len();
        self.calls.borrow_mut().push(batch.to_vec());

        if self.fail_on_batch == Some(call) {
            return Err(ScreenerError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            });
        }

        Ok(batch
            .iter()
            .filter_map(|s| self.quotes.get(s).map(|q| (s.clone(), q.clone())))
            .collect())
    }
}

pub fn symbols(names: &[&str]) -> Vec<Symbol> {
    names.iter().map(|s| s.to_string()).collect()
}

/// A row with a price and a one-year return.
pub fn row_1y(symbol: &str, price: f64, one_year: Option<f64>) -> Row {
    let mut quote = Quote::new(Some(price));
    if let Some(v) = one_year {
        quote = quote.with_change(Horizon::OneYear, v);
    }
    Row::new(symbol, quote)
}

/// A row with the same return on every horizon.
pub fn row_flat(symbol: &str, price: f64, change: f64) -> Row {
    let quote = Horizon::ALL
        .iter()
        .fold(Quote::new(Some(price)), |q, h| q.with_change(*h, change));
    Row::new(symbol, quote)
}

/// A row with explicit `[1m, 3m, 6m, 1y]` returns.
pub fn row_horizons(symbol: &str, price: f64, changes: [f64; 4]) -> Row {
    let quote = Horizon::ALL
        .iter()
        .zip(changes)
        .fold(Quote::new(Some(price)), |q, (h, v)| q.with_change(*h, v));
    Row::new(symbol, quote)
}

pub fn tickers(rows: &[Row]) -> Vec<&str> {
    rows.iter().map(|r| r.symbol.as_str()).collect()
}

//! Momentum screener for Rust.
//!
//! Fetches quote and statistics data for a ticker universe from an IEX
//! Cloud-compatible batch API, ranks the symbols (equal-weight, single-metric
//! momentum, or the multi-horizon "high-quality momentum" composite) and
//! sizes an equal-dollar position in each survivor.
//!
//! Everything runs synchronously: one blocking request per batch of at most
//! 100 symbols, issued in order.
//!
//! # Quick start
//!
//! ```no_run
//! use momentum_screener::{RankingMode, Screener};
//!
//! let screener = Screener::builder().sandbox().build().unwrap();
//! let universe = momentum_screener::universe::load_universe("sp_500_stocks.csv").unwrap();
//!
//! let trades = screener
//!     .run(&universe, &RankingMode::hqm(), 1_000_000.0)
//!     .unwrap();
//! ```

pub mod allocation;
pub mod batch;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod provider;
pub mod ranking;
pub mod report;
pub mod universe;

pub use error::{Result, ScreenerError};
pub use models::{Horizon, Quote, Row, Symbol};
pub use provider::{IexCloudProvider, QuoteProvider};
pub use ranking::RankingMode;

use std::fmt;
use std::time::Duration;

use tracing::info;

// ---------------------------------------------------------------------------
// ScreenerBuilder
// ---------------------------------------------------------------------------

/// Builder for a [`Screener`] backed by [`IexCloudProvider`].
///
/// Use [`Screener::builder()`] to obtain one.
pub struct ScreenerBuilder {
    token: Option<String>,
    base_url: String,
    timeout: Duration,
    batch_size: usize,
}

impl Default for ScreenerBuilder {
    fn default() -> Self {
        Self {
            token: None,
            base_url: config::IEX_CLOUD_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            batch_size: config::MAX_BATCH_SIZE,
        }
    }
}

impl ScreenerBuilder {
    /// Set the API token explicitly.
    ///
    /// If not set, [`build()`](ScreenerBuilder::build) reads it from the
    /// `IEX_CLOUD_API_TOKEN` environment variable.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Use the IEX Cloud sandbox (randomized data, no cost).
    pub fn sandbox(mut self) -> Self {
        self.base_url = config::IEX_SANDBOX_BASE.to_string();
        self
    }

    /// Set a custom API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of symbols per request. Must be between 1 and 100.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Build the screener and its HTTP client.
    pub fn build(self) -> Result<Screener<IexCloudProvider>> {
        let token = match self.token {
            Some(token) => token,
            None => config::token_from_env()?,
        };
        let provider = IexCloudProvider::with_base_url(token, self.base_url, self.timeout)?;
        Screener::with_provider(provider, self.batch_size)
    }
}

// ---------------------------------------------------------------------------
// Screener
// ---------------------------------------------------------------------------

/// The fetch, rank and allocate pipeline over one [`QuoteProvider`].
pub struct Screener<P: QuoteProvider = IexCloudProvider> {
    provider: P,
    batch_size: usize,
}

impl Screener<IexCloudProvider> {
    /// Create a new builder for an IEX Cloud backed screener.
    pub fn builder() -> ScreenerBuilder {
        ScreenerBuilder::default()
    }
}

impl<P: QuoteProvider> Screener<P> {
    /// Wrap any provider. `batch_size` must be between 1 and 100.
    pub fn with_provider(provider: P, batch_size: usize) -> Result<Self> {
        if batch_size == 0 || batch_size > config::MAX_BATCH_SIZE {
            return Err(ScreenerError::InvalidArgument(format!(
                "batch size must be between 1 and {}, got {}",
                config::MAX_BATCH_SIZE,
                batch_size
            )));
        }
        Ok(Self {
            provider,
            batch_size,
        })
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetch rows for `symbols`, one provider call per batch.
    pub fn fetch(&self, symbols: &[Symbol]) -> Result<Vec<Row>> {
        provider::fetch_rows(&self.provider, symbols, self.batch_size)
    }

    /// Fetch and rank, without allocating.
    pub fn screen(&self, symbols: &[Symbol], mode: &RankingMode) -> Result<Vec<Row>> {
        let rows = self.fetch(symbols)?;
        ranking::rank(rows, mode)
    }

    /// Fetch, rank and allocate `portfolio_value` evenly across the survivors.
    pub fn run(
        &self,
        symbols: &[Symbol],
        mode: &RankingMode,
        portfolio_value: f64,
    ) -> Result<Vec<Row>> {
        let ranked = self.screen(symbols, mode)?;
        info!(
            source = self.provider.source_name(),
            requested = symbols.len(),
            ranked = ranked.len(),
            "screen complete"
        );
        allocation::allocate(ranked, portfolio_value)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<P: QuoteProvider> fmt::Display for Screener<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Screener(source={}, batch_size={})",
            self.provider.source_name(),
            self.batch_size
        )
    }
}

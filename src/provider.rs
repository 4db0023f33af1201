//! Quote providers and the sequential batched fetch loop.
//!
//! A [`QuoteProvider`] answers one batch request at a time. [`fetch_rows`]
//! splits the universe with [`batch`](crate::batch::batch), calls the provider
//! once per batch in order, and turns the responses into [`Row`]s. A failed
//! batch aborts the whole run; symbols the provider has no data for are
//! skipped.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::batch::batch;
use crate::config;
use crate::error::{Result, ScreenerError};
use crate::models::{Horizon, Quote, Row, Symbol};

/// Source of batch quote/statistics data.
pub trait QuoteProvider {
    fn source_name(&self) -> &'static str;

    /// Fetch quotes for one batch of symbols.
    ///
    /// Symbols the provider has no data for may be left out of the map.
    fn fetch(&self, batch: &[Symbol]) -> Result<HashMap<Symbol, Quote>>;
}

// ---------------------------------------------------------------------------
// fetch_rows
// ---------------------------------------------------------------------------

/// Fetch every symbol in `symbols` in batches of `batch_size` and build rows.
///
/// Batches are requested one after another. Rows come back in universe order.
/// Any provider failure is returned as [`ScreenerError::Provider`] naming the
/// failing batch (zero-based) and its symbols; nothing fetched before it is
/// returned.
pub fn fetch_rows<P: QuoteProvider + ?Sized>(
    provider: &P,
    symbols: &[Symbol],
    batch_size: usize,
) -> Result<Vec<Row>> {
    if batch_size > config::MAX_BATCH_SIZE {
        return Err(ScreenerError::InvalidArgument(format!(
            "batch size {} exceeds the provider limit of {}",
            batch_size,
            config::MAX_BATCH_SIZE
        )));
    }

    let groups = batch(symbols, batch_size)?;
    let mut rows = Vec::with_capacity(symbols.len());

    for (index, group) in groups.iter().enumerate() {
        debug!(
            source = provider.source_name(),
            batch = index,
            size = group.len(),
            "fetching batch"
        );

        let quotes = provider
            .fetch(group)
            .map_err(|e| ScreenerError::Provider {
                batch: index,
                symbols: group.join(","),
                message: e.to_string(),
            })?;

        for symbol in group {
            let quote = quotes
                .get(symbol)
                .or_else(|| quotes.get(&symbol.to_ascii_uppercase()))
                .cloned();
            match quote {
                Some(quote) => rows.push(Row::new(symbol.clone(), quote)),
                None => warn!(symbol = %symbol, batch = index, "no data returned; skipping"),
            }
        }
    }

    debug!(rows = rows.len(), requested = symbols.len(), "fetch complete");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// IexCloudProvider
// ---------------------------------------------------------------------------

/// Provider backed by the IEX Cloud `stock/market/batch` endpoint.
///
/// The token is sent as a query parameter and never logged. Transport errors
/// have their URL stripped before they are surfaced.
pub struct IexCloudProvider {
    token: String,
    base_url: String,
    http: Client,
}

impl IexCloudProvider {
    /// Create a provider against the production IEX Cloud API.
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self> {
        Self::with_base_url(token, config::IEX_CLOUD_BASE, timeout)
    }

    /// Create a provider against a custom base URL (sandbox, mirror, or a test server).
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            token: token.into(),
            base_url: base_url.into(),
            http,
        })
    }

    fn batch_url(&self) -> String {
        format!("{}/stock/market/batch", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Debug for IexCloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IexCloudProvider")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl QuoteProvider for IexCloudProvider {
    fn source_name(&self) -> &'static str {
        "iexcloud"
    }

    fn fetch(&self, batch: &[Symbol]) -> Result<HashMap<Symbol, Quote>> {
        let symbols = batch.join(",");
        let resp = self
            .http
            .get(self.batch_url())
            .query(&[
                ("symbols", symbols.as_str()),
                ("types", "quote,stats"),
                ("token", self.token.as_str()),
            ])
            .send()
            .map_err(|e| ScreenerError::Http(e.without_url()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| ScreenerError::Http(e.without_url()))?;

        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let entries: HashMap<Symbol, Option<BatchEntry>> = serde_json::from_str(&body)?;
        Ok(entries
            .into_iter()
            .filter_map(|(symbol, entry)| entry.map(|e| (symbol, e.into_quote())))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BatchEntry {
    #[serde(default)]
    quote: Option<IexQuote>,
    #[serde(default)]
    stats: Option<IexStats>,
    #[serde(default)]
    price: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexQuote {
    latest_price: Option<f64>,
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IexStats {
    #[serde(default)]
    marketcap: Option<f64>,
    #[serde(default)]
    month1_change_percent: Option<f64>,
    #[serde(default)]
    month3_change_percent: Option<f64>,
    #[serde(default)]
    month6_change_percent: Option<f64>,
    #[serde(default)]
    year1_change_percent: Option<f64>,
}

impl BatchEntry {
    fn into_quote(self) -> Quote {
        let (latest_price, quote_cap) = match self.quote {
            Some(q) => (q.latest_price, q.market_cap),
            None => (None, None),
        };

        let mut quote = Quote {
            price: latest_price.or(self.price),
            market_cap: quote_cap,
            ..Quote::default()
        };

        if let Some(stats) = self.stats {
            quote.market_cap = quote.market_cap.or(stats.marketcap);
            let changes = [
                (Horizon::OneMonth, stats.month1_change_percent),
                (Horizon::ThreeMonth, stats.month3_change_percent),
                (Horizon::SixMonth, stats.month6_change_percent),
                (Horizon::OneYear, stats.year1_change_percent),
            ];
            for (horizon, value) in changes {
                if let Some(v) = value.filter(|v| v.is_finite()) {
                    quote.change_percent.insert(horizon, v);
                }
            }
        }

        quote
    }
}

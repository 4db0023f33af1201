use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ScreenerError;

/// An opaque ticker string.
pub type Symbol = String;

// ---------------------------------------------------------------------------
// Horizon - lookback window for a price-change percentage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "3m")]
    ThreeMonth,
    #[serde(rename = "6m")]
    SixMonth,
    #[serde(rename = "1y")]
    OneYear,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [
        Horizon::OneMonth,
        Horizon::ThreeMonth,
        Horizon::SixMonth,
        Horizon::OneYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::OneMonth => "1m",
            Horizon::ThreeMonth => "3m",
            Horizon::SixMonth => "6m",
            Horizon::OneYear => "1y",
        }
    }

    /// Field name in the IEX `stats` payload.
    pub fn stats_field(&self) -> &'static str {
        match self {
            Horizon::OneMonth => "month1ChangePercent",
            Horizon::ThreeMonth => "month3ChangePercent",
            Horizon::SixMonth => "month6ChangePercent",
            Horizon::OneYear => "year1ChangePercent",
        }
    }

    /// Human-readable prefix used in report headers, e.g. `"One-Year"`.
    pub fn label(&self) -> &'static str {
        match self {
            Horizon::OneMonth => "One-Month",
            Horizon::ThreeMonth => "Three-Month",
            Horizon::SixMonth => "Six-Month",
            Horizon::OneYear => "One-Year",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = ScreenerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1m" | "1mo" | "month1" => Ok(Horizon::OneMonth),
            "3m" | "3mo" | "month3" => Ok(Horizon::ThreeMonth),
            "6m" | "6mo" | "month6" => Ok(Horizon::SixMonth),
            "1y" | "12m" | "year1" => Ok(Horizon::OneYear),
            other => Err(ScreenerError::InvalidArgument(format!(
                "unknown horizon '{}'. expected one of: 1m | 3m | 6m | 1y",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Quote - per-symbol market data returned by a provider
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Latest price. `None` when the provider has no usable price.
    pub price: Option<f64>,
    pub market_cap: Option<f64>,
    /// Fractional returns keyed by horizon. A missing key means no data.
    #[serde(default)]
    pub change_percent: BTreeMap<Horizon, f64>,
}

impl Quote {
    pub fn new(price: Option<f64>) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    pub fn with_market_cap(mut self, market_cap: f64) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    pub fn with_change(mut self, horizon: Horizon, change: f64) -> Self {
        self.change_percent.insert(horizon, change);
        self
    }

    /// Raw change percent for a horizon, `None` when the provider had no data.
    pub fn change(&self, horizon: Horizon) -> Option<f64> {
        self.change_percent.get(&horizon).copied()
    }

    /// Change percent with missing data treated as zero momentum.
    pub fn momentum(&self, horizon: Horizon) -> f64 {
        self.change(horizon).unwrap_or(0.0)
    }

    /// A strictly positive, finite price.
    pub fn usable_price(&self) -> Option<f64> {
        self.price.filter(|p| p.is_finite() && *p > 0.0)
    }
}

use std::time::Duration;

use crate::error::{Result, ScreenerError};
use crate::models::Horizon;

pub const IEX_CLOUD_BASE: &str = "https://cloud.iexapis.com/stable";
pub const IEX_SANDBOX_BASE: &str = "https://sandbox.iexapis.com/stable";

/// Environment variable holding the IEX Cloud API token.
pub const TOKEN_ENV: &str = "IEX_CLOUD_API_TOKEN";

/// Upper bound on symbols per batch request imposed by the provider.
pub const MAX_BATCH_SIZE: usize = 100;

pub const DEFAULT_TOP_N: usize = 50;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const MAX_PROMPT_ATTEMPTS: usize = 3;

pub const EQUAL_WEIGHT_REPORT: &str = "recommended_trades.csv";
pub const MOMENTUM_REPORT: &str = "momentum_strategy.csv";

pub fn default_horizons() -> Vec<Horizon> {
    vec![
        Horizon::OneYear,
        Horizon::SixMonth,
        Horizon::ThreeMonth,
        Horizon::OneMonth,
    ]
}

/// Read the API token from the environment.
///
/// Empty or whitespace-only values count as missing.
pub fn token_from_env() -> Result<String> {
    match std::env::var(TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ScreenerError::MissingCredential(format!(
            "set {} in the environment or a .env file",
            TOKEN_ENV
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Provider error on batch {batch} [{symbols}]: {message}")]
    Provider {
        batch: usize,
        symbols: String,
        message: String,
    },

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid portfolio value: {0}")]
    InvalidPortfolioValue(String),

    #[error("Cannot allocate a portfolio across zero rows")]
    EmptyPortfolio,

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;

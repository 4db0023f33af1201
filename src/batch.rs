//! Splits a ticker universe into provider-sized request batches.

use crate::error::{Result, ScreenerError};

/// Split `symbols` into contiguous chunks of at most `max_size`, preserving order.
///
/// Only the last chunk may be smaller than `max_size`. An empty input yields
/// no chunks at all rather than a single empty one.
///
/// # Example
///
/// ```rust
/// use momentum_screener::batch::batch;
///
/// let groups = batch(&["A", "B", "C"], 2).unwrap();
/// assert_eq!(groups, vec![vec!["A", "B"], vec!["C"]]);
/// ```
pub fn batch<S: Clone>(symbols: &[S], max_size: usize) -> Result<Vec<Vec<S>>> {
    if max_size == 0 {
        return Err(ScreenerError::InvalidArgument(
            "batch size must be positive".to_string(),
        ));
    }
    Ok(symbols.chunks(max_size).map(|c| c.to_vec()).collect())
}

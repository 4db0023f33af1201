//! Ranking engine: equal-weight pass-through, single-metric top-N momentum,
//! and the multi-horizon "high-quality momentum" (HQM) composite.
//!
//! Missing or non-finite change percents are scored as `0.0` and that value is
//! written back into the row, so symbols with short histories (new listings)
//! rank as flat.

use std::cmp::Ordering;

use tracing::debug;

use crate::config;
use crate::error::{Result, ScreenerError};
use crate::models::{Horizon, Row};

// ---------------------------------------------------------------------------
// RankingMode
// ---------------------------------------------------------------------------

/// Which screen to run over the fetched rows. Chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingMode {
    /// Keep every row in fetch order.
    EqualWeight,
    /// Keep the `n` rows with the highest change percent over `metric`.
    TopN { metric: Horizon, n: usize },
    /// Keep the `n` rows with the highest mean percentile over `horizons`.
    Composite { horizons: Vec<Horizon>, n: usize },
}

impl RankingMode {
    /// Top-N on one-year returns with the default cut-off.
    pub fn momentum() -> Self {
        RankingMode::TopN {
            metric: Horizon::OneYear,
            n: config::DEFAULT_TOP_N,
        }
    }

    /// HQM composite over 1y, 6m, 3m and 1m with the default cut-off.
    pub fn hqm() -> Self {
        RankingMode::Composite {
            horizons: config::default_horizons(),
            n: config::DEFAULT_TOP_N,
        }
    }
}

/// Apply `mode` to `rows`.
pub fn rank(rows: Vec<Row>, mode: &RankingMode) -> Result<Vec<Row>> {
    match mode {
        RankingMode::EqualWeight => Ok(rows),
        RankingMode::TopN { metric, n } => top_n(rows, *metric, *n),
        RankingMode::Composite { horizons, n } => composite(rows, horizons, *n),
    }
}

// ---------------------------------------------------------------------------
// Top-N single metric
// ---------------------------------------------------------------------------

/// Sort rows descending by `metric` and keep the first `n`.
///
/// The sort is stable, so rows with equal values keep their fetch order.
/// Fewer than `n` rows is not an error: all of them are returned.
pub fn top_n(mut rows: Vec<Row>, metric: Horizon, n: usize) -> Result<Vec<Row>> {
    ensure_positive(n)?;

    for row in rows.iter_mut() {
        row.normalize_missing(metric);
    }
    rows.sort_by(|a, b| descending(a.quote.momentum(metric), b.quote.momentum(metric)));
    rows.truncate(n);

    debug!(metric = %metric, kept = rows.len(), "top-n ranking complete");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// HQM composite
// ---------------------------------------------------------------------------

/// Score every row by the mean of its per-horizon percentiles and keep the top `n`.
///
/// Each horizon's population is the full set of rows passed in (after
/// normalization), so a row's own value counts towards its percentile.
pub fn composite(mut rows: Vec<Row>, horizons: &[Horizon], n: usize) -> Result<Vec<Row>> {
    ensure_positive(n)?;
    if horizons.is_empty() {
        return Err(ScreenerError::InvalidArgument(
            "composite ranking needs at least one horizon".to_string(),
        ));
    }

    for row in rows.iter_mut() {
        for &horizon in horizons {
            row.normalize_missing(horizon);
        }
    }

    for &horizon in horizons {
        let population = SortedPopulation::new(rows.iter().map(|r| r.quote.momentum(horizon)));
        for row in rows.iter_mut() {
            let pct = population.percentile_of(row.quote.momentum(horizon));
            row.percentiles.insert(horizon, pct);
        }
    }

    for row in rows.iter_mut() {
        let sum: f64 = horizons.iter().filter_map(|h| row.percentile(*h)).sum();
        row.composite_score = Some(sum / horizons.len() as f64);
    }

    rows.sort_by(|a, b| {
        descending(
            a.composite_score.unwrap_or(0.0),
            b.composite_score.unwrap_or(0.0),
        )
    });
    rows.truncate(n);

    debug!(horizons = horizons.len(), kept = rows.len(), "composite ranking complete");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Percentile-of-score
// ---------------------------------------------------------------------------

/// Fraction of `population` that is less than or equal to `value`, in `[0, 1]`.
///
/// This is the "weak" percentile-of-score: ties and the value itself count.
/// Non-finite values, in the population or as `value`, count as `0.0`. An
/// empty population scores `0.0`.
pub fn percentile_of_score(population: &[f64], value: f64) -> f64 {
    SortedPopulation::new(population.iter().copied()).percentile_of(value)
}

/// A population sorted once so each lookup is a binary search.
struct SortedPopulation {
    values: Vec<f64>,
}

impl SortedPopulation {
    fn new(values: impl Iterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = values.map(finite_or_zero).collect();
        values.sort_by(f64::total_cmp);
        Self { values }
    }

    fn percentile_of(&self, value: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = finite_or_zero(value);
        let at_or_below = self.values.partition_point(|v| *v <= value);
        at_or_below as f64 / self.values.len() as f64
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn ensure_positive(n: usize) -> Result<()> {
    if n == 0 {
        return Err(ScreenerError::InvalidArgument(
            "top-n cut-off must be positive".to_string(),
        ));
    }
    Ok(())
}

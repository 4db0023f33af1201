//! Report schema and CSV output tests.

mod common;

use common::{row_1y, row_flat};
use momentum_screener::allocation::allocate;
use momentum_screener::ranking::rank;
use momentum_screener::report::{columns, write_csv, write_report};
use momentum_screener::{Horizon, Quote, RankingMode, Row};

fn render(rows: &[Row], mode: &RankingMode) -> Vec<String> {
    let mut buf = Vec::new();
    write_csv(rows, mode, &mut buf).unwrap();
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn equal_weight_schema() {
    let headers: Vec<String> = columns(&RankingMode::EqualWeight)
        .into_iter()
        .map(|c| c.header)
        .collect();
    assert_eq!(
        headers,
        vec![
            "Ticker",
            "Stock Price",
            "Market Capitalization",
            "Number of Shares to Buy"
        ]
    );
}

#[test]
fn momentum_schema_names_the_metric() {
    let mode = RankingMode::TopN {
        metric: Horizon::SixMonth,
        n: 10,
    };
    let headers: Vec<String> = columns(&mode).into_iter().map(|c| c.header).collect();
    assert_eq!(headers[2], "Six-Month Price Return");
    assert_eq!(headers.len(), 4);
}

#[test]
fn hqm_schema_has_return_and_percentile_per_horizon() {
    let headers: Vec<String> = columns(&RankingMode::hqm())
        .into_iter()
        .map(|c| c.header)
        .collect();
    assert_eq!(headers.len(), 3 + 4 * 2 + 1);
    assert_eq!(headers[3], "One-Year Price Return");
    assert_eq!(headers[4], "One-Year Return Percentile");
    assert_eq!(headers[10], "One-Month Return Percentile");
    assert_eq!(headers.last().unwrap(), "HQM Score");
}

#[test]
fn equal_weight_rows_render_with_empty_missing_cells() {
    let rows = vec![
        Row::new("AAPL", Quote::new(Some(200.0)).with_market_cap(3.0e12)),
        Row::new("NOPX", Quote::new(None)),
    ];
    let rows = allocate(rows, 1_000.0).unwrap();
    let lines = render(&rows, &RankingMode::EqualWeight);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "AAPL,$200.00,$3000000000000.00,2");
    assert_eq!(lines[2], "NOPX,,,");
}

#[test]
fn momentum_rows_render_ranked_values() {
    let mode = RankingMode::TopN {
        metric: Horizon::OneYear,
        n: 2,
    };
    let rows = vec![
        row_1y("A", 10.0, Some(0.5)),
        row_1y("B", 20.0, Some(0.1)),
        row_1y("C", 40.0, None),
    ];
    let rows = allocate(rank(rows, &mode).unwrap(), 100.0).unwrap();
    let lines = render(&rows, &mode);

    assert_eq!(lines[0], "Ticker,Price,One-Year Price Return,Number of Shares to Buy");
    assert_eq!(lines[1], "A,$10.00,50.0%,5");
    assert_eq!(lines[2], "B,$20.00,10.0%,2");
}

#[test]
fn hqm_rows_include_scores() {
    let mode = RankingMode::hqm();
    let rows = vec![row_flat("UP", 10.0, 0.2), row_flat("DOWN", 10.0, -0.2)];
    let rows = rank(rows, &mode).unwrap();
    let lines = render(&rows, &mode);

    assert!(lines[1].starts_with("UP,$10.00,,20.0%,100.0%,"));
    assert!(lines[1].ends_with(",1.00"));
    assert!(lines[2].starts_with("DOWN,$10.00,,-20.0%,50.0%,"));
    assert!(lines[2].ends_with(",0.50"));
}

#[test]
fn writes_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recommended_trades.csv");
    let rows = allocate(vec![row_1y("A", 10.0, None)], 100.0).unwrap();

    write_report(&rows, &RankingMode::EqualWeight, &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Ticker,Stock Price"));
    assert!(contents.contains("A,$10.00,,10"));
}

#[test]
fn cells_use_fixed_precision() {
    let mode = RankingMode::TopN {
        metric: Horizon::OneYear,
        n: 5,
    };
    let rows = vec![row_1y("FP", 0.1 + 0.2, Some(0.1 + 0.2))];
    let rows = allocate(rank(rows, &mode).unwrap(), 10.0).unwrap();
    let lines = render(&rows, &mode);

    assert_eq!(lines[1], "FP,$0.30,30.0%,33");
}

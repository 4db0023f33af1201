use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use momentum_screener::allocation::{allocate, parse_portfolio_value, summarize};
use momentum_screener::prompt::prompt_portfolio_value;
use momentum_screener::{config, report, universe, Horizon, RankingMode, Result, Screener};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Every constituent, equal dollar weight.
    EqualWeight,
    /// Top-N by a single horizon's price return.
    Momentum,
    /// Top-N by the mean of 1y/6m/3m/1m return percentiles.
    Hqm,
}

#[derive(Debug, Parser)]
#[command(name = "momentum-screener", version, about = "Equal-weight and momentum trade lists from IEX Cloud quotes")]
struct Cli {
    /// CSV file with a `Ticker` column.
    #[arg(long, default_value = "sp_500_stocks.csv")]
    universe: PathBuf,

    #[arg(long, value_enum, default_value_t = Strategy::Hqm)]
    strategy: Strategy,

    /// Number of symbols kept by the momentum strategies.
    #[arg(long, default_value_t = config::DEFAULT_TOP_N)]
    top_n: usize,

    /// Horizon ranked by the `momentum` strategy (1m, 3m, 6m, 1y).
    #[arg(long, default_value = "1y")]
    metric: Horizon,

    /// Portfolio value; prompted for on stdin when omitted.
    #[arg(long)]
    portfolio: Option<String>,

    /// Report path. Defaults depend on the strategy.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Use the IEX Cloud sandbox.
    #[arg(long)]
    sandbox: bool,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,

    #[arg(long, default_value_t = config::MAX_BATCH_SIZE)]
    batch_size: usize,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mode = match cli.strategy {
        Strategy::EqualWeight => RankingMode::EqualWeight,
        Strategy::Momentum => RankingMode::TopN {
            metric: cli.metric,
            n: cli.top_n,
        },
        Strategy::Hqm => RankingMode::Composite {
            horizons: config::default_horizons(),
            n: cli.top_n,
        },
    };

    let symbols = universe::load_universe(&cli.universe)?;
    info!("{} tickers in universe {}", symbols.len(), cli.universe.display());

    let mut builder = Screener::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .batch_size(cli.batch_size);
    if cli.sandbox {
        builder = builder.sandbox();
    }
    if let Some(url) = cli.base_url {
        builder = builder.base_url(url);
    }
    let screener = builder.build()?;

    let ranked = screener.screen(&symbols, &mode)?;

    let portfolio_value = match cli.portfolio {
        Some(raw) => parse_portfolio_value(&raw)?,
        None => prompt_portfolio_value(
            &mut io::stdin().lock(),
            &mut io::stdout(),
            config::MAX_PROMPT_ATTEMPTS,
        )?,
    };

    let rows = allocate(ranked, portfolio_value)?;
    let summary = summarize(&rows, portfolio_value);
    info!(
        positions = summary.positions,
        position_size = summary.position_size,
        invested = summary.invested,
        cash_remaining = summary.cash_remaining,
        "allocation"
    );

    let output = cli.output.unwrap_or_else(|| {
        PathBuf::from(match mode {
            RankingMode::EqualWeight => config::EQUAL_WEIGHT_REPORT,
            _ => config::MOMENTUM_REPORT,
        })
    });
    report::write_report(&rows, &mode, &output)?;
    info!("wrote {} rows to {}", rows.len(), output.display());

    Ok(())
}

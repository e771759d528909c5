//! covid-county-level
//!
//! Prints this week's COVID-19 community level for each county in a state.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use covid_level::{rank, CommunityLevelClient, LevelConfig, WeekQuery};

#[derive(Parser)]
#[command(name = "covid-county-level")]
#[command(version, about = "Show COVID-19 community levels by county", long_about = None)]
struct Cli {
    /// State to report on
    #[arg(long, default_value = "Maryland")]
    state: String,

    /// Limit the report to one county (e.g. "Howard County")
    #[arg(long)]
    county: Option<String>,

    /// Last day of the one-week window (default: today)
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<NaiveDate>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter from `RUST_LOG`, falling back to warnings plus debug for this tool when verbose.
fn log_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    let default_filter = if verbose {
        "warn,covid_level=debug,covid_county_level=debug"
    } else {
        "warn"
    };
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into())
}

/// Initialize tracing/logging. Logs go to stderr so stdout stays a clean report.
fn init_tracing(filter: tracing_subscriber::EnvFilter) {
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // Before tracing: .env may set RUST_LOG.
    dotenvy::dotenv().ok();
    init_tracing(log_filter(cli.verbose));

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = LevelConfig::from_env().context("Invalid COVID_COUNTY_LEVEL_* configuration")?;
    let client = CommunityLevelClient::new(&config).context("Failed to build HTTP client")?;

    let query = WeekQuery {
        state: cli.state,
        county: cli.county,
        end: cli.date.unwrap_or_else(|| Local::now().date_naive()),
    };
    let records = client
        .fetch_week(&query)
        .await
        .with_context(|| format!("Failed to fetch community levels for {}", query.state))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for county in rank(records) {
        writeln!(out, "{county}")?;
    }
    out.flush()?;

    Ok(())
}

//! find-playbook-modules
//!
//! Lists the modules a playbook or task file most likely invokes.

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playbook_modules::{ScanConfig, Scanner};

#[derive(Parser)]
#[command(name = "find-playbook-modules")]
#[command(version, about = "Look for modules used in an ansible playbook", long_about = None)]
struct Cli {
    /// Playbook or task file to parse for list of modules
    #[arg(value_name = "FILENAME", required = true)]
    filename: Vec<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter from `RUST_LOG`, falling back to warnings plus debug for this tool when verbose.
fn log_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    let default_filter = if verbose {
        "warn,playbook_modules=debug,find_playbook_modules=debug"
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

fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default of 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Before tracing: .env may set RUST_LOG.
    dotenvy::dotenv().ok();
    init_tracing(log_filter(cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = ScanConfig::from_env().context("Invalid PLAYBOOK_MODULES_* configuration")?;
    tracing::debug!(
        extensions = ?config.extensions,
        max_depth = config.max_depth,
        files = cli.filename.len(),
        "Scanner configuration loaded"
    );

    let scanner = Scanner::from_config(&config);
    let stdout = io::stdout();
    let stderr = io::stderr();
    playbook_modules::run(&scanner, &cli.filename, &mut stdout.lock(), &mut stderr.lock())
}

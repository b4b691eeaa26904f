mod app;
mod config;
mod engine;
mod models;
mod source;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use app::run_tui;
use models::Snapshot;

#[derive(Parser)]
#[command(name = "opsdeck")]
#[command(version = "0.1.0")]
#[command(about = "TUI dashboard for live agent operations: costs, schedules, sessions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Snapshot file to poll (overrides config)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Poll interval in milliseconds (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a snapshot file and print its sanity warnings
    Check {
        /// Path to the snapshot file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check { path }) => check(&path),
        None => {
            init_logging()?;

            let mut config = config::load().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "could not load config, using defaults");
                config::Config::default()
            });
            if let Some(data) = cli.data {
                config.data_path = data;
            }
            if let Some(interval) = cli.interval_ms {
                config.poll_interval_ms = interval;
            }

            run_tui(config).await
        }
    }
}

fn check(path: &PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;

    println!(
        "{}: {} session(s), {} cron(s), {} chart point(s), totalCostToday {:.2}",
        path.display(),
        snapshot.sessions.len(),
        snapshot.crons.len(),
        snapshot.daily_chart.len(),
        snapshot.total_cost_today,
    );

    let warnings = snapshot.sanity_warnings();
    if warnings.is_empty() {
        println!("no warnings");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

/// The TUI owns the terminal, so logs go to a file under the config dir.
fn init_logging() -> Result<()> {
    let path = config::log_path()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("opsdeck=info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

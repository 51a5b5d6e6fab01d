//! `casebook`: command-line access to the Casebook investigation store.
//!
//! # Usage
//!
//! ```text
//! casebook case add --crime-type Robbery --location "5th Ave" --date 2024-01-01
//! casebook suspect add --name "Jane Doe" --age 30 --alibi home --case-id 1
//! casebook case delete 1
//! casebook --json detective list
//! ```
//!
//! Settings come from `casebook.toml` (or `--config`) and `CASEBOOK_*`
//! environment variables; `--database` overrides both.

mod commands;
mod render;
mod settings;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use casebook_store_sqlite::SqliteStore;
use tracing_subscriber::EnvFilter;

use commands::Command;
use render::Output;
use settings::Settings;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "casebook", version, about = "Case records for a criminal-investigation office")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// SQLite database file (default: crime.db).
  #[arg(long, value_name = "PATH")]
  database: Option<PathBuf>,

  /// Print records as JSON instead of a grid.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  match run(cli).await {
    Ok(code) => code,
    Err(e) => {
      eprintln!("error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
  let settings = Settings::load(cli.config.as_deref())?;
  init_tracing(&settings.log_level);

  let database = cli
    .database
    .map(|p| settings::expand_tilde(&p))
    .unwrap_or(settings.database);

  let store = SqliteStore::open(&database)
    .await
    .with_context(|| format!("failed to open store at {}", database.display()))?;

  commands::execute(&store, cli.command, Output { json: cli.json }).await
}

/// Log to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(default_level: &str) {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();
}

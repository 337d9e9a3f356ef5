//! `valet` — parking ticket tracker for the till-side terminal.
//!
//! # Usage
//!
//! ```
//! valet open "Central lot" --rate 100
//! valet list
//! valet show 4f1c --watch
//! valet close 4f1c
//! valet history
//! valet delete 4f1c
//! ```

mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use valet_core::{clock::SystemClock, ledger::TicketLedger};
use valet_store_sqlite::SqliteStore;

const DEFAULT_CONFIG_PATH: &str = "~/.config/valet/config.toml";
const DEFAULT_STORE_PATH: &str = "~/.local/share/valet/tickets.db";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "valet", about = "Parking ticket tracker", version)]
struct Cli {
  /// Path to a TOML config file (default: ~/.config/valet/config.toml).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Path to the SQLite ticket database; overrides the config file.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Open a ticket for a vehicle entering a lot.
  Open {
    /// Display name of the parking lot.
    parking_name: String,
    /// Price per started hour, in currency units.
    #[arg(short, long)]
    rate: u32,
  },
  /// List open tickets with their live duration and amount due.
  List,
  /// Show one open ticket in detail.
  Show {
    /// Ticket id (a unique prefix is enough).
    id: String,
    /// Refresh the live amount once per second until Ctrl-C.
    #[arg(long)]
    watch: bool,
  },
  /// Close a ticket: bill every started hour and move it to history.
  Close {
    /// Ticket id (a unique prefix is enough).
    id: String,
  },
  /// List closed tickets.
  History,
  /// Remove a closed ticket from history.
  Delete {
    /// Ticket id (a unique prefix is enough).
    id: String,
  },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
  store_path: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration: file, then VALET_* environment overrides.
  let config_path = cli
    .config
    .clone()
    .unwrap_or_else(|| expand_tilde(Path::new(DEFAULT_CONFIG_PATH)));
  let settings = config::Config::builder()
    .add_source(config::File::from(config_path).required(false))
    .add_source(config::Environment::with_prefix("VALET"))
    .build()
    .context("failed to read config file")?;
  let file_cfg: ConfigFile = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  // CLI flag overrides config, which overrides the default path.
  let store_path = expand_tilde(
    &cli
      .store
      .or(file_cfg.store_path)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
  );
  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  tracing::debug!(store = %store_path.display(), "opening ticket store");
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {}", store_path.display()))?;

  let ledger = TicketLedger::new(store, SystemClock);
  commands::run(cli.command, &ledger).await
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

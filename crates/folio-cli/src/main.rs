//! `folio`: command-line front end for a Folio reference library.
//!
//! # Usage
//!
//! ```text
//! folio init
//! folio collection create Books
//! folio item new book --field title="The Name of the Rose"
//! folio collection add Books 1
//! folio -L ~/papers item list --search eco
//! ```
//!
//! The library is the first `folio.sqlite` found by walking up from
//! `--library`, or else from the configured library, the user data directory
//! and the current directory, in that order.

mod commands;
mod library;
mod paths;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Command, Output};
use folio_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Manage a library of bibliographic references")]
struct Args {
  /// Library file, or a directory to search upwards from.
  #[arg(short = 'L', long, value_name = "LIBRARY_PATH", global = true)]
  library: Option<PathBuf>,

  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Print JSON instead of plain text.
  #[arg(long, global = true)]
  json: bool,

  #[command(subcommand)]
  command: Command,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so stdout stays parseable.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();
  let settings = settings::Settings::load(args.config.as_deref())?;
  let mut out = Output::new(io::stdout(), args.json);

  let command = match args.command {
    Command::Init { path } => {
      let library = library::init(path).await?;
      return out.library(&library);
    }
    Command::Store(command) => command,
  };

  let library = library::locate(args.library, settings.library)?;
  tracing::info!(library = %library.display(), "using library");

  let store = SqliteStore::open(&library)
    .await
    .with_context(|| format!("failed to open library at {}", library.display()))?;

  commands::run(&store, command, &mut out).await
}

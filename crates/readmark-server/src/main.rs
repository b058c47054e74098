//! readmark server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite status store, and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use readmark_server::{DatabaseLocation, ServerConfig};
use readmark_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Per-article reading status server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, std::env::var("DATABASE_URL").ok())
    .context("failed to load configuration")?;

  let store = open_store(&server_cfg.database_url).await?;

  let app = readmark_server::router(Arc::new(store));
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(readmark_server::shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

/// Open the store named by `database_url`, creating its directory if needed.
async fn open_store(database_url: &str) -> anyhow::Result<SqliteStore> {
  let location = DatabaseLocation::parse(database_url);

  if let Some(dir) = location.parent_dir() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create database directory {dir:?}"))?;
  }

  let store = match &location {
    DatabaseLocation::Memory => {
      tracing::warn!("using an in-memory database; statuses will not persist");
      SqliteStore::open_in_memory().await
    }
    DatabaseLocation::File(path) => {
      tracing::info!(path = %path.display(), "opening status store");
      SqliteStore::open(path).await
    }
  };

  store.with_context(|| format!("failed to open store at {database_url:?}"))
}

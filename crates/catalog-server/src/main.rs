//! catalog-server binary.
//!
//! Loads `catalog.toml` (or the file named by `--config`) with `CATALOG_*`
//! environment overrides, opens the SQLite store, sweeps promotions and then
//! serves the JSON API. `--sweep-only` stops after the sweep, for cron use.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use catalog_server::{ServerConfig, app, spawn_periodic_sweep, startup_sweep};
use catalog_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Product catalog server")]
struct Cli {
  /// TOML configuration file.
  #[arg(short, long, default_value = "catalog.toml")]
  config: PathBuf,

  /// Sweep promotions once and exit.
  #[arg(long)]
  sweep_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  let store_path = cfg.resolved_store_path();
  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );

  startup_sweep(store.as_ref(), &cfg, cli.sweep_only)
    .await
    .context("promotion sweep failed")?;
  if cli.sweep_only {
    return Ok(());
  }

  let sweeper = cfg
    .sweep_interval()
    .map(|period| spawn_periodic_sweep(Arc::clone(&store), period));

  let address = format!("{}:{}", cfg.host, cfg.port);
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  info!(%address, "serving catalog API");

  let served = axum::serve(listener, app(store)).await;
  if let Some(task) = sweeper {
    task.abort();
  }
  served.context("server error")
}

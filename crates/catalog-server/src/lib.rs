//! Server wiring for the product catalog: configuration, the HTTP app, and
//! the scheduled promotion sweep.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use catalog_core::{promotion::Promotion, store::CatalogStore, sweep};
use chrono::Local;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Server configuration loaded from `catalog.toml` and `CATALOG_*` variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  /// Run one sweep before accepting requests.
  #[serde(default = "default_true")]
  pub sweep_on_startup:    bool,
  /// Re-run the sweep on this period. Off when unset.
  #[serde(default)]
  pub sweep_interval_secs: Option<u64>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("catalog.db") }

fn default_true() -> bool { true }

impl ServerConfig {
  /// Layer `CATALOG_*` environment variables over the TOML file at `path`.
  /// A missing file is not an error.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Config::builder()
      .add_source(File::from(path).required(false))
      .add_source(Environment::with_prefix("CATALOG"))
      .build()?
      .try_deserialize()
  }

  /// `store_path` with a leading `~/` resolved against `$HOME`.
  pub fn resolved_store_path(&self) -> PathBuf {
    match (self.store_path.strip_prefix("~"), std::env::var_os("HOME")) {
      (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
      _ => self.store_path.clone(),
    }
  }

  pub fn sweep_interval(&self) -> Option<Duration> {
    self
      .sweep_interval_secs
      .filter(|secs| *secs > 0)
      .map(Duration::from_secs)
  }
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// The catalog API with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + 'static,
{
  catalog_api::api_router(store).layer(TraceLayer::new_for_http())
}

// ─── Sweep scheduling ────────────────────────────────────────────────────────

/// Run one sweep against the local calendar date.
pub async fn sweep_now<S: CatalogStore>(
  store: &S,
) -> catalog_core::Result<Vec<Promotion>> {
  sweep::sweep(store, Local::now().date_naive()).await
}

/// The sweep run before serving: always with `--sweep-only`, otherwise when
/// `sweep_on_startup` is set. Returns `None` when skipped.
pub async fn startup_sweep<S: CatalogStore>(
  store: &S,
  cfg: &ServerConfig,
  sweep_only: bool,
) -> catalog_core::Result<Option<Vec<Promotion>>> {
  if !(sweep_only || cfg.sweep_on_startup) {
    return Ok(None);
  }
  let active = sweep_now(store).await?;
  info!(active = active.len(), "startup sweep finished");
  Ok(Some(active))
}

/// Sweep every `period` until the task is aborted. The first run happens one
/// full period after spawning. Failures are logged and the schedule continues.
pub fn spawn_periodic_sweep<S>(store: Arc<S>, period: Duration) -> JoinHandle<()>
where
  S: CatalogStore + 'static,
{
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
      ticker.tick().await;
      match sweep_now(store.as_ref()).await {
        Ok(active) => info!(active = active.len(), "scheduled sweep finished"),
        Err(e) => error!(error = %e, "scheduled sweep failed"),
      }
    }
  })
}

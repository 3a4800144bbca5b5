//! Quotesync — Entry Point
//!
//! Initializes configuration, logging, persistence, and the sync
//! engine. Runs until SIGINT/SIGTERM.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Open the file store and load the quote store (seed on first run)
//! 4. Create RemoteClient (HTTP + timeout + retry)
//! 5. Create SyncEngine over the shared store
//! 6. Spawn health/metrics server (/live + /ready + /metrics)
//! 7. Start the periodic sync scheduler (first pass runs immediately)
//! 8. Wait for SIGINT → graceful shutdown (unready→stop→exit)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::{Mutex, watch};
use tracing::{error, info, warn};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::client::{RemoteClient, RemoteClientConfig};
use adapters::metrics::Metrics;
use adapters::notify::LogNotifier;
use adapters::persistence::FileStore;
use usecases::handlers::CommandHandlers;
use usecases::store::QuoteStore;
use usecases::sync_engine::{SyncEngine, SyncScheduler};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        remote = %config.sync.remote_url,
        interval_secs = config.sync.interval_seconds,
        "Starting quotesync"
    );

    // ── 3. Open persistence and load the store ──────────────
    let storage = Arc::new(
        FileStore::new(&config.persistence.data_dir)
            .await
            .context("Failed to open data directory")?,
    );
    let store = QuoteStore::load(storage)
        .await
        .context("Failed to load quote store")?;
    info!(
        quotes = store.len(),
        categories = store.categories().len(),
        selected = %store.selected_category(),
        "Quote store ready"
    );
    let store = Arc::new(Mutex::new(store));

    // ── 4. Create the remote client ─────────────────────────
    let remote_config = RemoteClientConfig {
        endpoint: config.sync.remote_url.clone(),
        timeout: Duration::from_secs(config.sync.timeout_seconds),
        max_retries: config.sync.max_retries,
        retry_base_delay: Duration::from_millis(config.sync.retry_base_delay_ms),
    };
    let remote = Arc::new(
        RemoteClient::new(remote_config).context("Failed to create remote client")?,
    );

    // ── 5. Create the sync engine over the shared store ─────
    let notifier = Arc::new(LogNotifier);
    let engine = Arc::new(SyncEngine::new(
        Arc::clone(&store),
        remote,
        Arc::clone(&notifier) as Arc<dyn ports::notifier::Notifier>,
        config.sync.fallback_category.clone(),
    ));

    // The command surface the presentation layer drives; used here for
    // the startup quote so a fresh deployment logs something visible.
    let handlers = CommandHandlers::new(
        Arc::clone(&store),
        Arc::clone(&engine),
        notifier as Arc<dyn ports::notifier::Notifier>,
    );
    if let Some(quote) = handlers.on_show_quote_requested().await {
        info!(text = %quote.text, category = %quote.category, "Quote of the day");
    }

    // ── 6. Spawn health/metrics server ──────────────────────
    let (ready_tx, ready_rx) = watch::channel(true);
    let mut metrics_handle = None;
    if config.observability.enabled {
        let metrics = Arc::new(
            Metrics::new(Arc::clone(&engine), Arc::clone(&store))
                .context("Failed to register metrics")?,
        );
        let bind_address = config.observability.bind_address.clone();
        metrics_handle = Some(tokio::spawn(async move {
            if let Err(e) = metrics.serve(bind_address, ready_rx).await {
                error!(error = %e, "Health server failed");
            }
        }));
    }

    // ── 7. Start the periodic sync scheduler ────────────────
    let scheduler = SyncScheduler::start(
        Arc::clone(&engine),
        Duration::from_secs(config.sync.interval_seconds),
    );

    info!("All tasks spawned — quotesync is running");

    // ── 8. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    // ── Graceful shutdown (unready→stop→exit) ───────────────

    // 1. Mark health as unhealthy (readiness probe → 503)
    let _ = ready_tx.send(false);

    // 2. Stop the periodic sync loop (up to 10s)
    if tokio::time::timeout(Duration::from_secs(10), scheduler.stop())
        .await
        .is_err()
    {
        warn!("Timed out waiting for periodic sync to stop");
    }

    // 3. Stop the health server
    if let Some(handle) = metrics_handle {
        handle.abort();
    }

    let status = engine.status();
    info!(
        runs = status.runs,
        appended = status.appended,
        failures = status.failures,
        "Shutdown complete"
    );
    Ok(())
}

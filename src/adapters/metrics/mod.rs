//! Metrics Adapter - Prometheus Registry and Health Endpoints
//!
//! Exposes `/live`, `/ready`, and `/metrics` on a configured bind
//! address. Gauges are snapshotted from the sync engine and store at
//! scrape time, so the business code carries no Prometheus types.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, Gauge, IntGauge, Registry, TextEncoder};
use tokio::sync::{Mutex, watch};
use tracing::info;

use crate::usecases::store::QuoteStore;
use crate::usecases::sync_engine::SyncEngine;

/// Centralized Prometheus metrics for the sync service.
///
/// All metrics follow the naming convention `quotesync_*`.
pub struct Metrics {
    /// Prometheus registry.
    registry: Registry,
    /// Reconcile passes since startup.
    sync_runs: IntGauge,
    /// Remote fetches that failed and were treated as empty.
    sync_failures: IntGauge,
    /// Remote quotes appended since startup.
    quotes_appended: IntGauge,
    /// Current number of stored quotes.
    store_quotes: IntGauge,
    /// Unix timestamp of the most recent reconcile.
    last_sync_timestamp: Gauge,
    /// Sync engine snapshot source.
    engine: Arc<SyncEngine>,
    /// Store snapshot source.
    store: Arc<Mutex<QuoteStore>>,
}

impl Metrics {
    /// Create and register all Prometheus metrics.
    pub fn new(engine: Arc<SyncEngine>, store: Arc<Mutex<QuoteStore>>) -> Result<Self> {
        let registry = Registry::new();

        let sync_runs = IntGauge::new(
            "quotesync_sync_runs_total",
            "Reconcile passes since startup",
        )?;
        let sync_failures = IntGauge::new(
            "quotesync_sync_failures_total",
            "Remote fetches that failed and were treated as empty",
        )?;
        let quotes_appended = IntGauge::new(
            "quotesync_quotes_appended_total",
            "Remote quotes appended since startup",
        )?;
        let store_quotes = IntGauge::new(
            "quotesync_store_quotes",
            "Current number of stored quotes",
        )?;
        let last_sync_timestamp = Gauge::new(
            "quotesync_last_sync_timestamp_seconds",
            "Unix timestamp of the most recent reconcile",
        )?;

        registry.register(Box::new(sync_runs.clone()))?;
        registry.register(Box::new(sync_failures.clone()))?;
        registry.register(Box::new(quotes_appended.clone()))?;
        registry.register(Box::new(store_quotes.clone()))?;
        registry.register(Box::new(last_sync_timestamp.clone()))?;

        Ok(Self {
            registry,
            sync_runs,
            sync_failures,
            quotes_appended,
            store_quotes,
            last_sync_timestamp,
            engine,
            store,
        })
    }

    /// Snapshot current state into the gauges and encode the registry.
    pub async fn render(&self) -> String {
        let status = self.engine.status();
        self.sync_runs.set(status.runs as i64);
        self.sync_failures.set(status.failures as i64);
        self.quotes_appended.set(status.appended as i64);
        self.store_quotes.set(self.store.lock().await.len() as i64);
        if let Some(at) = status.last_sync_at {
            self.last_sync_timestamp.set(at.timestamp() as f64);
        }

        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        if encoder.encode(&self.registry.gather(), &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }

    /// Serve health and metrics endpoints on the given bind address.
    ///
    /// - `/live`    — Liveness probe: 200 if the process is running
    /// - `/ready`   — Readiness probe: 503 during graceful shutdown
    /// - `/metrics` — Prometheus text exposition
    pub async fn serve(
        self: Arc<Self>,
        bind_address: String,
        ready_rx: watch::Receiver<bool>,
    ) -> Result<()> {
        let metrics_self = Arc::clone(&self);

        let app = Router::new()
            .route("/live", get(|| async { StatusCode::OK }))
            .route(
                "/ready",
                get(move || {
                    let rx = ready_rx.clone();
                    async move {
                        if *rx.borrow() {
                            StatusCode::OK
                        } else {
                            StatusCode::SERVICE_UNAVAILABLE
                        }
                    }
                }),
            )
            .route(
                "/metrics",
                get(move || {
                    let metrics = Arc::clone(&metrics_self);
                    async move { metrics.render().await }
                }),
            );

        let listener = tokio::net::TcpListener::bind(&bind_address).await?;
        info!(address = %bind_address, "Health and metrics server started");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

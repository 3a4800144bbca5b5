//! Sync Engine - Remote Reconciliation Loop
//!
//! Fetches the remote record sequence, reconciles it against the store
//! with a remote-additive, local-preserving merge, and reports outcome
//! through the notifier. Runs once at startup and on a fixed periodic
//! timer owned by an explicit scheduler handle; a manual sync runs the
//! identical reconcile and always notifies.
//!
//! Transport and decode failures never propagate out of a sync cycle:
//! they are logged and treated as an empty remote result, so periodic
//! sync survives transient network trouble.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

use crate::domain::quote::Quote;
use crate::ports::notifier::Notifier;
use crate::ports::remote_source::{RemoteItem, RemoteSource};

use super::store::QuoteStore;

/// Message emitted when a reconcile appended remote quotes.
pub const SYNC_NOTIFICATION: &str = "Quotes synced with server!";

/// Message emitted after every manual sync, changed or not.
pub const MANUAL_SYNC_NOTIFICATION: &str = "Manual sync completed.";

/// Result of one reconcile pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOutcome {
    /// Whether anything was appended to the store.
    pub updated: bool,
    /// Number of remote quotes appended.
    pub appended: usize,
}

/// Counters and timing snapshot for observability.
#[derive(Debug, Clone, Copy)]
pub struct SyncStatus {
    /// Total reconcile passes since startup.
    pub runs: u64,
    /// Remote fetches that failed and were treated as empty.
    pub failures: u64,
    /// Total remote quotes appended since startup.
    pub appended: u64,
    /// Completion time of the most recent reconcile.
    pub last_sync_at: Option<DateTime<Utc>>,
}

/// Map one remote item into a quote.
///
/// `title` becomes the text, `body` the category; a missing or blank
/// body gets the fallback category. Items with a blank title carry no
/// usable text and are skipped.
fn quote_from_item(item: RemoteItem, fallback_category: &str) -> Option<Quote> {
    let text = item.title.trim();
    if text.is_empty() {
        return None;
    }

    let category = item
        .body
        .as_deref()
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .unwrap_or(fallback_category);

    Some(Quote::new(text, category))
}

/// Reconciles the local store against the remote source.
pub struct SyncEngine {
    /// The shared quote store.
    store: Arc<Mutex<QuoteStore>>,
    /// Remote record feed.
    remote: Arc<dyn RemoteSource>,
    /// Status message sink.
    notifier: Arc<dyn Notifier>,
    /// Category substituted when a remote body is missing or blank.
    fallback_category: String,
    /// Total reconcile passes.
    runs: AtomicU64,
    /// Failed remote fetches.
    failures: AtomicU64,
    /// Total quotes appended from remote.
    appended: AtomicU64,
    /// Completion time of the most recent reconcile.
    last_sync_at: RwLock<Option<DateTime<Utc>>>,
}

impl SyncEngine {
    /// Create a new sync engine.
    pub fn new(
        store: Arc<Mutex<QuoteStore>>,
        remote: Arc<dyn RemoteSource>,
        notifier: Arc<dyn Notifier>,
        fallback_category: String,
    ) -> Self {
        Self {
            store,
            remote,
            notifier,
            fallback_category,
            runs: AtomicU64::new(0),
            failures: AtomicU64::new(0),
            appended: AtomicU64::new(0),
            last_sync_at: RwLock::new(None),
        }
    }

    /// Fetch and map the remote record sequence.
    ///
    /// Fails softly: any transport or decode error is logged, counted,
    /// and returned as zero records so the caller never crashes.
    pub async fn fetch_remote(&self) -> Vec<Quote> {
        match self.remote.fetch().await {
            Ok(items) => {
                let quotes: Vec<Quote> = items
                    .into_iter()
                    .filter_map(|item| quote_from_item(item, &self.fallback_category))
                    .collect();
                debug!(count = quotes.len(), "Remote records fetched");
                quotes
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "Remote fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Run one reconcile pass: fetch, append whatever is missing under
    /// the strict identity rule, persist, and notify when updated.
    ///
    /// The fetch happens outside the store lock, so overlapping passes
    /// may race to append the same records; the additive-only merge
    /// makes that race lose nothing.
    #[instrument(skip(self), name = "reconcile")]
    pub async fn reconcile(&self) -> Result<SyncOutcome> {
        self.runs.fetch_add(1, Ordering::Relaxed);

        let incoming = self.fetch_remote().await;

        let outcome = if incoming.is_empty() {
            SyncOutcome::default()
        } else {
            let mut store = self.store.lock().await;
            let appended = store.append_missing(incoming).await?;
            SyncOutcome {
                updated: appended > 0,
                appended,
            }
        };

        if outcome.updated {
            self.appended
                .fetch_add(outcome.appended as u64, Ordering::Relaxed);
            self.notifier.notify(SYNC_NOTIFICATION);
            info!(appended = outcome.appended, "Remote quotes merged");
        } else {
            debug!("Store already up to date with remote");
        }

        if let Ok(mut guard) = self.last_sync_at.write() {
            *guard = Some(Utc::now());
        }

        Ok(outcome)
    }

    /// Run the identical reconcile, then always notify completion.
    pub async fn manual_sync(&self) -> Result<SyncOutcome> {
        let result = self.reconcile().await;
        self.notifier.notify(MANUAL_SYNC_NOTIFICATION);
        result
    }

    /// Snapshot of counters and the last sync time.
    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            runs: self.runs.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            appended: self.appended.load(Ordering::Relaxed),
            last_sync_at: self.last_sync_at.read().ok().and_then(|guard| *guard),
        }
    }
}

/// Handle owning the periodic sync task.
///
/// Returned by [`SyncScheduler::start`]; dropping it without calling
/// [`SyncScheduler::stop`] leaves the task running for the process
/// lifetime, which matches the always-on deployment mode.
pub struct SyncScheduler {
    /// Shutdown signal for the periodic task.
    shutdown_tx: watch::Sender<bool>,
    /// The spawned periodic task.
    task: JoinHandle<()>,
}

impl SyncScheduler {
    /// Spawn the periodic reconcile loop.
    ///
    /// The first tick completes immediately, so one reconcile runs at
    /// startup; thereafter one runs every `period`.
    pub fn start(engine: Arc<SyncEngine>, period: Duration) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(period_secs = period.as_secs(), "Periodic sync started");

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            info!("Periodic sync received shutdown signal");
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        match engine.reconcile().await {
                            Ok(outcome) if outcome.updated => {
                                info!(appended = outcome.appended, "Sync cycle merged remote quotes");
                            }
                            Ok(_) => debug!("Sync cycle found nothing new"),
                            Err(e) => warn!(error = %e, "Sync cycle failed"),
                        }
                    }
                }
            }
        });

        Self { shutdown_tx, task }
    }

    /// Signal the periodic task to stop and wait for it to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, body: Option<&str>) -> RemoteItem {
        RemoteItem {
            title: title.to_string(),
            body: body.map(String::from),
        }
    }

    #[test]
    fn test_mapping_uses_title_and_body() {
        let quote = quote_from_item(item("Be yourself", Some("X")), "Server").unwrap();
        assert_eq!(quote.text, "Be yourself");
        assert_eq!(quote.category, "X");
    }

    #[test]
    fn test_mapping_falls_back_on_missing_body() {
        let quote = quote_from_item(item("No body here", None), "Server").unwrap();
        assert_eq!(quote.category, "Server");
    }

    #[test]
    fn test_mapping_falls_back_on_blank_body() {
        let quote = quote_from_item(item("Blank body", Some("   ")), "Server").unwrap();
        assert_eq!(quote.category, "Server");
    }

    #[test]
    fn test_mapping_skips_blank_title() {
        assert!(quote_from_item(item("   ", Some("X")), "Server").is_none());
    }

    #[test]
    fn test_mapping_trims_both_parts() {
        let quote = quote_from_item(item("  padded  ", Some("  Y  ")), "Server").unwrap();
        assert_eq!(quote.text, "padded");
        assert_eq!(quote.category, "Y");
    }
}

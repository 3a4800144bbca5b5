//! Command Handlers - The Presentation Layer Contract
//!
//! Explicit command methods that a UI collaborator invokes on discrete
//! user actions. This is the only coupling between presentation and
//! the core: the UI calls these handlers and renders the notifier's
//! messages plus whatever they return.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::domain::error::StoreError;
use crate::domain::quote::{Quote, pick_random};
use crate::ports::notifier::Notifier;

use super::store::QuoteStore;
use super::sync_engine::{SyncEngine, SyncOutcome};
use super::transfer::{EXPORT_FILE_NAME, TransferManager};

/// Command surface the UI layer drives.
pub struct CommandHandlers {
    /// The shared quote store.
    store: Arc<Mutex<QuoteStore>>,
    /// Sync engine for manual sync requests.
    engine: Arc<SyncEngine>,
    /// Export/import surface.
    transfer: TransferManager,
}

impl CommandHandlers {
    /// Create the command surface over shared components.
    pub fn new(
        store: Arc<Mutex<QuoteStore>>,
        engine: Arc<SyncEngine>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let transfer = TransferManager::new(Arc::clone(&store), notifier);
        Self {
            store,
            engine,
            transfer,
        }
    }

    /// A new quote was submitted. Validation failures surface
    /// synchronously and leave the store unchanged.
    pub async fn on_add_quote_requested(
        &self,
        text: &str,
        category: &str,
    ) -> Result<Quote, StoreError> {
        self.store.lock().await.add(text, category).await
    }

    /// The category filter changed. Persists the preference and
    /// returns the new filtered view.
    pub async fn on_filter_changed(&self, selected: &str) -> Result<Vec<Quote>, StoreError> {
        let mut store = self.store.lock().await;
        store.set_selected_category(selected).await?;
        Ok(store.filtered(store.selected_category()))
    }

    /// A random quote was requested for display.
    ///
    /// Draws uniformly from the current filtered view; an empty view is
    /// the non-error "nothing to show" state.
    pub async fn on_show_quote_requested(&self) -> Option<Quote> {
        let store = self.store.lock().await;
        let candidates = store.filtered(store.selected_category());
        drop(store);

        pick_random(&candidates).ok().cloned()
    }

    /// The distinct categories, for populating a filter control.
    pub async fn on_categories_requested(&self) -> Vec<String> {
        self.store.lock().await.categories()
    }

    /// A manual sync was requested.
    pub async fn on_manual_sync_requested(&self) -> Result<SyncOutcome> {
        self.engine.manual_sync().await
    }

    /// An export document was requested. Returns the fixed download
    /// filename together with the document body.
    pub async fn on_export_requested(&self) -> Result<(&'static str, String)> {
        let document = self.transfer.export_document().await?;
        Ok((EXPORT_FILE_NAME, document))
    }

    /// An import document was uploaded.
    pub async fn on_import_requested(&self, document: &str) -> Result<usize, StoreError> {
        self.transfer.import_merge(document).await
    }
}

//! Transfer Manager - Document Export and Additive Import
//!
//! Serializes the full store to a pretty-printed JSON document and
//! merges an uploaded document of the same shape back in. Import is
//! strictly additive and never deduplicates; a document that fails
//! shape validation leaves the store untouched.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::error::StoreError;
use crate::domain::quote::Quote;
use crate::ports::notifier::Notifier;

use super::store::QuoteStore;

/// Fixed filename for exported documents.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Message emitted after a successful import merge.
pub const IMPORT_NOTIFICATION: &str = "Quotes imported successfully!";

/// Parse and shape-validate an import document.
///
/// The document must be a JSON array of objects with string `text` and
/// `category` fields, each non-empty after trimming. Anything else is
/// a document error; nothing is merged on failure.
pub(crate) fn parse_document(document: &str) -> Result<Vec<Quote>, StoreError> {
    let parsed: Vec<Quote> =
        serde_json::from_str(document).map_err(|e| StoreError::Document(e.to_string()))?;

    let mut validated = Vec::with_capacity(parsed.len());
    for (index, quote) in parsed.iter().enumerate() {
        let quote = Quote::validated(&quote.text, &quote.category).map_err(|_| {
            StoreError::Document(format!("entry {index} has an empty text or category"))
        })?;
        validated.push(quote);
    }

    Ok(validated)
}

/// Export/import surface over the shared store.
#[derive(Clone)]
pub struct TransferManager {
    /// The shared quote store.
    store: Arc<Mutex<QuoteStore>>,
    /// Status message sink.
    notifier: Arc<dyn Notifier>,
}

impl TransferManager {
    /// Create a new transfer manager.
    pub fn new(store: Arc<Mutex<QuoteStore>>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Serialize the full quote sequence, pretty-printed, with stable
    /// field order (`text`, then `category`). Re-importable losslessly.
    pub async fn export_document(&self) -> Result<String> {
        let store = self.store.lock().await;
        serde_json::to_string_pretty(store.quotes())
            .context("Failed to serialize quotes for export")
    }

    /// Merge an import document into the store.
    ///
    /// Every parsed quote is appended unconditionally; import does not
    /// deduplicate against existing quotes. The full store is persisted
    /// before returning; derived state is recomputed by readers.
    pub async fn import_merge(&self, document: &str) -> Result<usize, StoreError> {
        let incoming = parse_document(document)?;

        let appended = self.store.lock().await.append_all(incoming).await?;

        self.notifier.notify(IMPORT_NOTIFICATION);
        info!(appended, "Import document merged");

        Ok(appended)
    }
}

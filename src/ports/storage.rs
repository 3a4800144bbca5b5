//! Storage Port - Durable Key-Value Persistence Interface
//!
//! The store's sole point of contact with durable storage. Two logical
//! keys exist: the serialized quote list and the selected-category
//! preference. The core assumes nothing about the medium beyond these
//! operations.

use async_trait::async_trait;

use crate::domain::quote::Quote;

/// Trait for persistence providers.
///
/// All operations run to completion before returning; there is no
/// write queueing. A failed save must leave
/// the previously stored value untouched; partial writes are not
/// acceptable.
#[async_trait]
pub trait QuoteStorage: Send + Sync + 'static {
  /// Replace the stored quote list with `quotes`.
  async fn save_quotes(&self, quotes: &[Quote]) -> anyhow::Result<()>;

  /// Load the stored quote list. `None` means nothing was ever stored
  /// (or the stored value was unreadable and has been reported).
  async fn load_quotes(&self) -> anyhow::Result<Option<Vec<Quote>>>;

  /// Persist the selected-category preference.
  async fn save_selected_category(&self, value: &str) -> anyhow::Result<()>;

  /// Load the selected-category preference, if one was stored.
  async fn load_selected_category(&self) -> anyhow::Result<Option<String>>;

  /// Check that the storage medium is usable (disk space, permissions).
  async fn is_healthy(&self) -> bool;
}

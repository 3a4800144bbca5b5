//! Remote Source Port - Authoritative Record Feed Interface
//!
//! Defines the trait for fetching the remote record sequence that the
//! sync engine reconciles against. One fixed endpoint, read-only; no
//! authentication and no pagination.

use async_trait::async_trait;
use serde::Deserialize;

/// One item as served by the remote source.
///
/// The sync engine maps `title` to the quote text and `body` to the
/// category, substituting a configured fallback when the body is
/// missing or blank.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteItem {
  /// Item title; becomes the quote text.
  pub title: String,
  /// Optional item body; becomes the quote category.
  #[serde(default)]
  pub body: Option<String>,
}

/// Trait for remote record providers.
#[async_trait]
pub trait RemoteSource: Send + Sync + 'static {
  /// Fetch the full remote record sequence.
  ///
  /// Transport and decode failures surface as errors here; the sync
  /// engine recovers from them by treating the remote as empty.
  async fn fetch(&self) -> anyhow::Result<Vec<RemoteItem>>;

  /// Check if the remote endpoint is reachable.
  async fn is_healthy(&self) -> bool;
}

//! Notifier Port - Status Message Interface
//!
//! The sync engine and importer report human-readable outcome strings
//! through this trait. Rendering them is the presentation layer's
//! concern; the core only emits.

/// Receiver of human-readable status strings.
pub trait Notifier: Send + Sync + 'static {
  /// Deliver one status message. Fire-and-forget.
  fn notify(&self, message: &str);
}

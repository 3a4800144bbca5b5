//! Notification Adapter - Status Strings into Structured Logs
//!
//! Routes the core's human-readable status messages through `tracing`.
//! A UI embedding the library substitutes its own `Notifier`.

use tracing::info;

use crate::ports::notifier::Notifier;

/// Notifier that emits every message as an info-level log event.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "quotesync::notify", "{message}");
    }
}

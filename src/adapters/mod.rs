//! Adapters Layer - Port Implementations
//!
//! Concrete implementations of the ports against real infrastructure:
//! atomic JSON files for storage, reqwest for the remote source,
//! tracing for notifications, and Prometheus/axum for observability.

pub mod api;
pub mod metrics;
pub mod notify;
pub mod persistence;

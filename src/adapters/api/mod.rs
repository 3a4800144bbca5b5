//! API Adapter - Remote Source over HTTP
//!
//! Implements the `RemoteSource` port with a reqwest client against
//! one fixed read-only endpoint. Retries transient failures with
//! exponential backoff; no authentication.

pub mod client;

pub use client::{RemoteClient, RemoteClientConfig};

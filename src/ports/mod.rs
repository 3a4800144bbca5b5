//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use-case layer requires
//! from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `QuoteStorage`: durable key-value persistence for quotes and the
//!   selected-category preference
//! - `RemoteSource`: read-only fetch of the remote record sequence
//! - `Notifier`: human-readable status strings for the presentation layer

pub mod notifier;
pub mod remote_source;
pub mod storage;

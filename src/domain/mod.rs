//! Domain Layer - Quote Model and Merge Rules
//!
//! Pure business types and functions: the `Quote` entity, validation,
//! the identity rule used for remote merges, category derivation, and
//! random selection. No I/O: everything here is synchronous and
//! deterministic apart from `pick_random`.

pub mod error;
pub mod quote;

pub use error::StoreError;
pub use quote::{
    ALL_CATEGORIES, Quote, contains_quote, distinct_categories, filter_by_category, pick_random,
    seed_quotes,
};

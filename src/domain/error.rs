//! Store error taxonomy.
//!
//! Every fallible core operation maps onto one of these variants.
//! None of them is fatal to the process: a rejected add or a malformed
//! import leaves the store exactly as it was.

use thiserror::Error;

/// Errors surfaced by the quote store and its operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Add was called with an empty text or category (after trimming).
    #[error("quote text and category are both required")]
    EmptyField,

    /// An import document did not parse as a list of quotes.
    #[error("import document must be a JSON array of text/category objects: {0}")]
    Document(String),

    /// A random pick was requested from zero candidates.
    #[error("no quotes available to pick from")]
    NoCandidates,

    /// The persistence adapter failed; previously stored data is intact.
    #[error(transparent)]
    Persistence(#[from] anyhow::Error),
}

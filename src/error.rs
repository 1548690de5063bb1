// src/error.rs
use thiserror::Error;

/// Fatal per-page parse failures. These abort one page's contribution and
/// are converted into diagnostics by the harvester; they never abort the
/// whole catalog build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScrapeError {
    /// The table broke the fixed six-column shape, or its row-span
    /// bookkeeping did not close at a block boundary.
    #[error("{0}")]
    Shape(String),

    /// An access-level cell held a value outside the closed vocabulary.
    /// Never coerced; it means the upstream table language has changed.
    #[error("unknown access level {0:?}")]
    Vocabulary(String),
}

//! Error taxonomy for the flip engine.

use thiserror::Error;

/// Errors surfaced by the engine's public API.
///
/// Out-of-range flip targets are always reported, never silently clamped:
/// clamping would hide caller bugs. A detached data source is not an
/// error; the engine degrades to a zero-page no-op instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlipError {
    /// A `flip_to`/`smooth_flip_to` target outside `[0, page_count)`.
    #[error("page {page} does not exist (page count {page_count})")]
    PageOutOfRange { page: i64, page_count: usize },

    /// A data source reported fewer than one view type.
    #[error("view type count must be at least 1, got {0}")]
    InvalidTypeCount(usize),
}

//! Engine event notifications.
//!
//! Events are queued during an update cycle and drained by the host
//! afterwards, never delivered synchronously inside a state mutation, so
//! a listener may call straight back into the engine without reentrancy
//! hazards.

use crate::overflip::OverFlipMode;

/// A notification queued by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum FlipEvent {
    /// The view came to rest on a new page.
    FlippedToPage { page: usize, id: u64 },

    /// The flip distance was dragged past the first or last page.
    ///
    /// A magnitude of zero reports the boundary being re-crossed inward.
    OverFlip {
        mode: OverFlipMode,
        /// True when over-flipping past the first page, false past the last.
        flipping_previous: bool,
        /// Absolute cumulative over-flip distance, flip units.
        over_flip_distance: f32,
        /// Flip units per page, for normalizing the magnitude.
        flip_distance_per_page: f32,
    },
}

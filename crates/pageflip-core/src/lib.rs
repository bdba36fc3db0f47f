//! Paged 3-D page-flip engine.
//!
//! [`FlipEngine`] turns pointer input and programmatic flip requests into
//! a single continuous flip-distance scalar, and everything else follows
//! from it: fold geometry for the renderer, page-change and over-flip
//! notifications for the host, and a bounded recycling cache of page
//! surfaces fed by a [`PageAdapter`].

pub mod adapter;
pub mod cache;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod overflip;

pub use adapter::PageAdapter;
pub use cache::PageCache;
pub use engine::{fling_target, FlipEngine, FlipEngineConfig, FlipState, RenderPass};
pub use error::FlipError;
pub use events::FlipEvent;
pub use geometry::{fold_params, FoldParams, Half, Rect, UNITS_PER_PAGE};
pub use overflip::{OverFlipMode, OverFlipper};

pub use pageflip_foundation::Orientation;

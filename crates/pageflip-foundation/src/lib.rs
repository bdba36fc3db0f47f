//! Pointer, gesture, and velocity foundations for the page-flip engine.
//!
//! Everything here is measured in raw pointer pixels and milliseconds;
//! conversion into flip-distance units happens inside [`FlipGesture`] once
//! the viewport extent is known. None of these types know about pages,
//! caches, or fold geometry.

pub mod gesture;
pub mod gesture_constants;
pub mod velocity_tracker;

pub use gesture::{FlipGesture, GestureEnd, GestureUpdate, Orientation};
pub use velocity_tracker::VelocityTracker1D;

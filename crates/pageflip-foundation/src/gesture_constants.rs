//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels (or pixels per second). Hosts on
//! high-density touch screens should scale them by the device density
//! before handing them to the engine configuration.

/// Paging touch slop in logical pixels.
///
/// A pointer must travel at least this far along the flip axis before a
/// gesture commits to being a flip-drag. Matches the role of Android's
/// `ViewConfiguration.getScaledPagingTouchSlop()`, which is twice the
/// plain touch slop (~8dp) because paging containers sit behind
/// scrollable children and must be harder to trigger accidentally.
pub const PAGING_TOUCH_SLOP: f32 = 16.0;

/// Minimum fling velocity in logical pixels per second.
///
/// Release velocities below this magnitude are treated as a soft release
/// (snap to the nearest page) rather than a directed fling.
pub const MIN_FLING_VELOCITY: f32 = 400.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Release velocities are clamped to this magnitude before fling
/// resolution, matching Android's default maximum fling velocity on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

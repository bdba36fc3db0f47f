//! Boundary over-flip policies.
//!
//! When a drag pushes the flip distance past the first or last page, the
//! active policy decides what the stored distance becomes and what signal
//! the renderer gets. `calculate` is idempotent for in-bounds input and
//! monotonic in the raw distance outside bounds.

use crate::geometry::UNITS_PER_PAGE;

/// Cumulative pull (flip units) at which the glow reaches full strength.
const GLOW_SATURATION: f32 = UNITS_PER_PAGE / 2.0;

/// Milliseconds for a released glow to fade back to zero.
const GLOW_DECAY_MS: f32 = 300.0;

/// Maximum rubber-band stretch past a boundary, flip units.
const MAX_STRETCH: f32 = 70.0;

/// Pull distance scale of the rubber-band curve; one page of raw pull
/// reaches half the maximum stretch.
const STRETCH_SCALE: f32 = UNITS_PER_PAGE;

/// Which over-flip behavior the engine applies at the boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverFlipMode {
    /// Hard clamp plus an edge-glow intensity signal, Android-list style.
    #[default]
    Glow,
    /// Compressed elastic stretch past the boundary, iOS-list style.
    RubberBand,
}

/// Over-flip policy state, tagged by mode.
///
/// Adding a mode means adding a variant and a law-preserving `calculate`
/// arm; the engine never matches on the variant itself.
#[derive(Debug, Clone)]
pub enum OverFlipper {
    Glow(GlowState),
    RubberBand(RubberBandState),
}

/// Glow policy: cumulative pull and decaying intensity.
#[derive(Debug, Clone, Default)]
pub struct GlowState {
    total: f32,
    intensity: f32,
    released: bool,
}

/// Rubber-band policy: cumulative pull past the boundary.
#[derive(Debug, Clone, Default)]
pub struct RubberBandState {
    total: f32,
}

impl OverFlipper {
    pub fn new(mode: OverFlipMode) -> Self {
        match mode {
            OverFlipMode::Glow => OverFlipper::Glow(GlowState::default()),
            OverFlipMode::RubberBand => OverFlipper::RubberBand(RubberBandState::default()),
        }
    }

    pub fn mode(&self) -> OverFlipMode {
        match self {
            OverFlipper::Glow(_) => OverFlipMode::Glow,
            OverFlipper::RubberBand(_) => OverFlipMode::RubberBand,
        }
    }

    /// Reclamps a raw flip distance against `[min, max]`.
    ///
    /// In-bounds input is returned unchanged and resets the cumulative
    /// over-flip. Out-of-bounds input accumulates the per-call excess and
    /// returns the boundary (Glow) or the boundary plus a bounded damped
    /// stretch (RubberBand).
    pub fn calculate(&mut self, flip_distance: f32, min: f32, max: f32) -> f32 {
        let clamped = flip_distance.clamp(min, max);
        let excess = flip_distance - clamped;

        match self {
            OverFlipper::Glow(state) => {
                if excess == 0.0 {
                    state.total = 0.0;
                    flip_distance
                } else {
                    state.total += excess;
                    state.intensity = (state.total.abs() / GLOW_SATURATION).min(1.0);
                    state.released = false;
                    clamped
                }
            }
            OverFlipper::RubberBand(state) => {
                if excess == 0.0 {
                    state.total = 0.0;
                    flip_distance
                } else {
                    state.total += excess;
                    clamped + stretch(state.total)
                }
            }
        }
    }

    /// Signed cumulative over-flip distance; negative past the first page.
    pub fn total_over_flip(&self) -> f32 {
        match self {
            OverFlipper::Glow(state) => state.total,
            OverFlipper::RubberBand(state) => state.total,
        }
    }

    /// Called when the drag ends; resets the cumulative pull and lets the
    /// glow start fading.
    pub fn gesture_ended(&mut self) {
        match self {
            OverFlipper::Glow(state) => {
                state.total = 0.0;
                state.released = true;
            }
            OverFlipper::RubberBand(state) => state.total = 0.0,
        }
    }

    /// Advances time-based policy state; returns whether a redraw is
    /// still needed (a glow is fading).
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        match self {
            OverFlipper::Glow(state) => {
                if state.released && state.intensity > 0.0 {
                    state.intensity = (state.intensity - dt_ms / GLOW_DECAY_MS).max(0.0);
                    state.intensity > 0.0
                } else {
                    false
                }
            }
            OverFlipper::RubberBand(_) => false,
        }
    }

    /// Edge-glow intensity in `[0, 1]`; always 0 for rubber band.
    pub fn glow_intensity(&self) -> f32 {
        match self {
            OverFlipper::Glow(state) => state.intensity,
            OverFlipper::RubberBand(_) => 0.0,
        }
    }
}

/// Bounded damping of the cumulative pull.
///
/// `stretch(t) = MAX_STRETCH * t / (|t| + STRETCH_SCALE)`: zero at zero,
/// strictly increasing, approaching but never reaching ±`MAX_STRETCH`.
fn stretch(total: f32) -> f32 {
    MAX_STRETCH * total / (total.abs() + STRETCH_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_glow_in_bounds_identity() {
        let mut flipper = OverFlipper::new(OverFlipMode::Glow);
        for raw in [0.0, 1.0, 450.0, 900.0] {
            assert_eq!(flipper.calculate(raw, 0.0, 900.0), raw);
        }
        assert_eq!(flipper.total_over_flip(), 0.0);
    }

    #[test]
    fn test_glow_clamps_exactly() {
        let mut flipper = OverFlipper::new(OverFlipMode::Glow);
        assert_eq!(flipper.calculate(-50.0, 0.0, 900.0), 0.0);
        assert_eq!(flipper.calculate(950.0, 0.0, 900.0), 900.0);
    }

    #[test]
    fn test_glow_accumulates_and_resets() {
        let mut flipper = OverFlipper::new(OverFlipMode::Glow);
        flipper.calculate(-10.0, 0.0, 900.0);
        flipper.calculate(-15.0, 0.0, 900.0);
        assert_eq!(flipper.total_over_flip(), -25.0);
        assert!(flipper.glow_intensity() > 0.0);

        // Re-crossing inward resets the cumulative pull.
        flipper.calculate(30.0, 0.0, 900.0);
        assert_eq!(flipper.total_over_flip(), 0.0);
    }

    #[test]
    fn test_glow_decays_after_release() {
        let mut flipper = OverFlipper::new(OverFlipMode::Glow);
        flipper.calculate(-90.0, 0.0, 900.0);
        let peak = flipper.glow_intensity();
        assert!(peak > 0.9);

        // No decay while the gesture is still down.
        assert!(!flipper.tick(100.0));
        assert_eq!(flipper.glow_intensity(), peak);

        flipper.gesture_ended();
        assert!(flipper.tick(100.0));
        assert!(flipper.glow_intensity() < peak);
        while flipper.tick(100.0) {}
        assert_eq!(flipper.glow_intensity(), 0.0);
    }

    #[test]
    fn test_rubber_band_stretches_past_boundary() {
        let mut flipper = OverFlipper::new(OverFlipMode::RubberBand);
        let stretched = flipper.calculate(950.0, 0.0, 900.0);
        assert!(stretched > 900.0);
        assert!(stretched < 900.0 + MAX_STRETCH);
        assert_eq!(flipper.total_over_flip(), 50.0);
    }

    #[test]
    fn test_rubber_band_gesture_ended_resets() {
        let mut flipper = OverFlipper::new(OverFlipMode::RubberBand);
        flipper.calculate(-100.0, 0.0, 900.0);
        assert_eq!(flipper.total_over_flip(), -100.0);
        flipper.gesture_ended();
        assert_eq!(flipper.total_over_flip(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_in_bounds_is_idempotent(raw in 0.0f32..=900.0) {
            let mut glow = OverFlipper::new(OverFlipMode::Glow);
            let mut band = OverFlipper::new(OverFlipMode::RubberBand);
            prop_assert_eq!(glow.calculate(raw, 0.0, 900.0), raw);
            prop_assert_eq!(band.calculate(raw, 0.0, 900.0), raw);
        }

        #[test]
        fn prop_rubber_band_bounded_and_monotonic(
            a in -10_000.0f32..0.0,
            b in -10_000.0f32..0.0,
        ) {
            let mut first = OverFlipper::new(OverFlipMode::RubberBand);
            let mut second = OverFlipper::new(OverFlipMode::RubberBand);
            let lo = a.min(b) - 1.0;
            let hi = a.max(b);
            let out_lo = first.calculate(lo, 0.0, 900.0);
            let out_hi = second.calculate(hi, 0.0, 900.0);
            prop_assert!(out_lo < out_hi, "{} !< {}", out_lo, out_hi);
            prop_assert!(out_lo > -MAX_STRETCH);
        }

        #[test]
        fn prop_glow_monotonic_outside_bounds(excess in 0.0f32..10_000.0) {
            let mut flipper = OverFlipper::new(OverFlipMode::Glow);
            // Monotonic in the weak sense: everything past max maps to max.
            prop_assert_eq!(flipper.calculate(900.0 + excess, 0.0, 900.0), 900.0);
        }
    }
}

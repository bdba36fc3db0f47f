//! Peek preview animation.
//!
//! A bounded oscillation from a page's base flip distance out to a small
//! amplitude and back, hinting that an adjacent page exists without
//! committing a page change. Loops indefinitely unless started as a
//! one-shot; the engine cancels it on any drag or programmatic flip.

use crate::easing::Easing;

/// Reverse-repeating oscillation over flip distance.
#[derive(Debug, Clone)]
pub struct PeekAnimation {
    base: f32,
    /// Signed peak offset from the base, e.g. `+U/4` toward the next page.
    amplitude: f32,
    /// Duration of one leg (out or back), milliseconds.
    leg_duration_ms: f32,
    elapsed_ms: f32,
    once: bool,
    easing: Easing,
    value: f32,
    finished: bool,
}

impl PeekAnimation {
    pub fn new(base: f32, amplitude: f32, leg_duration_ms: f32, once: bool) -> Self {
        Self {
            base,
            amplitude,
            leg_duration_ms: leg_duration_ms.max(1.0),
            elapsed_ms: 0.0,
            once,
            easing: Easing::AccelerateDecelerate,
            value: base,
            finished: false,
        }
    }

    /// Advances by `dt_ms` and returns the new flip distance.
    ///
    /// A one-shot peek plays exactly one out-and-back cycle and finishes
    /// on the base value; a looping peek ping-pongs until dropped.
    pub fn tick(&mut self, dt_ms: f32) -> f32 {
        if self.finished {
            return self.value;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let mut leg = self.elapsed_ms / self.leg_duration_ms;

        if self.once && leg >= 2.0 {
            self.finished = true;
            self.value = self.base;
            return self.value;
        }
        leg %= 2.0;

        // Each leg replays the easing; the return leg runs it in reverse.
        let fraction = if leg < 1.0 { leg } else { 2.0 - leg };
        self.value = self.base + self.amplitude * self.easing.transform(fraction);
        self.value
    }

    /// The flip distance produced by the last tick.
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_reached_mid_cycle() {
        let mut peek = PeekAnimation::new(360.0, 45.0, 600.0, false);
        let at_peak = peek.tick(600.0);
        assert!((at_peak - 405.0).abs() < 1e-3, "got {at_peak}");
    }

    #[test]
    fn test_stays_within_bounds() {
        let mut peek = PeekAnimation::new(360.0, -45.0, 600.0, false);
        for _ in 0..200 {
            let value = peek.tick(37.0);
            assert!((315.0..=360.0).contains(&value), "out of bounds: {value}");
        }
        assert!(!peek.is_finished());
    }

    #[test]
    fn test_once_finishes_on_base() {
        let mut peek = PeekAnimation::new(180.0, 45.0, 600.0, true);
        let mut ticks = 0;
        while !peek.is_finished() {
            peek.tick(100.0);
            ticks += 1;
            assert!(ticks < 100, "one-shot peek never finished");
        }
        assert_eq!(peek.value(), 180.0);
    }

    #[test]
    fn test_looping_peek_never_finishes() {
        let mut peek = PeekAnimation::new(0.0, 45.0, 600.0, false);
        for _ in 0..50 {
            peek.tick(600.0);
        }
        assert!(!peek.is_finished());
    }

    #[test]
    fn test_return_leg_mirrors_out_leg() {
        let mut out_leg = PeekAnimation::new(0.0, 100.0, 600.0, false);
        let mut back_leg = PeekAnimation::new(0.0, 100.0, 600.0, false);
        let a = out_leg.tick(150.0);
        let b = back_leg.tick(2.0 * 600.0 - 150.0);
        assert!((a - b).abs() < 1e-3, "{a} vs {b}");
    }
}

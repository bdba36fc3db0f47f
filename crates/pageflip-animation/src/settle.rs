//! Ballistic settle animation.
//!
//! A finite tween from the flip distance at release toward a page
//! boundary. The engine computes the duration (square-root law over the
//! distance) and advances the tween from its tick loop.

use crate::easing::Easing;

/// A finite, interruptible tween over flip distance.
#[derive(Debug, Clone)]
pub struct SettleAnimation {
    start: f32,
    delta: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
    value: f32,
    finished: bool,
}

impl SettleAnimation {
    /// Starts a settle from `start` to `target` over `duration_ms`.
    ///
    /// A zero (or negative) duration finishes immediately at the target.
    pub fn new(start: f32, target: f32, duration_ms: f32, easing: Easing) -> Self {
        let finished = duration_ms <= 0.0;
        Self {
            start,
            delta: target - start,
            duration_ms,
            elapsed_ms: 0.0,
            easing,
            value: if finished { target } else { start },
            finished,
        }
    }

    /// Advances by `dt_ms` and returns the new flip distance.
    ///
    /// The final tick lands exactly on the target.
    pub fn tick(&mut self, dt_ms: f32) -> f32 {
        if self.finished {
            return self.value;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let linear = (self.elapsed_ms / self.duration_ms).min(1.0);
        if linear >= 1.0 {
            self.finished = true;
            self.value = self.start + self.delta;
        } else {
            self.value = self.start + self.delta * self.easing.transform(linear);
        }
        self.value
    }

    /// The flip distance produced by the last tick.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The flip distance this settle is heading toward.
    pub fn target(&self) -> f32 {
        self.start + self.delta
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaches_target_exactly() {
        let mut settle = SettleAnimation::new(360.0, 540.0, 200.0, Easing::Decelerate);
        let mut value = 0.0;
        for _ in 0..13 {
            value = settle.tick(16.0);
        }
        assert!(settle.is_finished());
        assert_eq!(value, 540.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let settle = SettleAnimation::new(100.0, 100.0, 0.0, Easing::Decelerate);
        assert!(settle.is_finished());
        assert_eq!(settle.value(), 100.0);
    }

    #[test]
    fn test_progress_is_decelerated() {
        let mut settle = SettleAnimation::new(0.0, 100.0, 100.0, Easing::Decelerate);
        let halfway = settle.tick(50.0);
        assert!(halfway > 50.0, "decelerate front-loads, got {halfway}");
        assert!(!settle.is_finished());
    }

    #[test]
    fn test_backward_settle() {
        let mut settle = SettleAnimation::new(540.0, 360.0, 100.0, Easing::Decelerate);
        let mid = settle.tick(50.0);
        assert!(mid < 540.0 && mid > 360.0);
        assert_eq!(settle.tick(60.0), 360.0);
    }

    #[test]
    fn test_value_stable_after_finish() {
        let mut settle = SettleAnimation::new(0.0, 90.0, 10.0, Easing::Linear);
        settle.tick(20.0);
        assert_eq!(settle.tick(16.0), 90.0);
        assert_eq!(settle.target(), 90.0);
    }
}

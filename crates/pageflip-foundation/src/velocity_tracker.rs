//! Single-axis velocity tracking for fling release.
//!
//! Impulse-strategy tracker: velocity is recovered from the kinetic
//! energy the pointer imparted over a short trailing window, which damps
//! single-sample noise far better than a two-point difference. Samples
//! are absolute positions along the flip axis.

/// Ring buffer size for velocity samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the velocity.
const HORIZON_MS: i64 = 100;

/// A gap between samples longer than this means the pointer stopped;
/// older samples are discarded.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1-D impulse-based velocity tracker.
///
/// Feed it the pointer's axis position on every event; ask it for a
/// velocity in pixels/second at release.
///
/// ```
/// use pageflip_foundation::VelocityTracker1D;
///
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_sample(0, 0.0);
/// tracker.add_sample(10, 50.0);
/// tracker.add_sample(20, 100.0);
/// assert!(tracker.velocity() > 0.0);
/// ```
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records the pointer's axis position at the given time.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Computes the current velocity in pixels/second.
    ///
    /// Returns 0.0 with fewer than two usable samples or when the pointer
    /// has been still longer than [`ASSUME_STOPPED_MS`].
    pub fn velocity(&self) -> f32 {
        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let mut current = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[current] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (sample.time_ms - previous.time_ms).abs() as f32;
            previous = newest;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            positions[count] = sample.position;
            times[count] = -age;

            current = if current == 0 {
                HISTORY_SIZE - 1
            } else {
                current - 1
            };

            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Computes the current velocity clamped to `±max_velocity`.
    pub fn velocity_clamped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    /// Discards all samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse velocity over samples ordered newest-first, in units/ms.
///
/// Work-energy bookkeeping: each inter-sample velocity contributes the
/// kinetic energy needed to reach it from the running estimate, and the
/// final energy converts back to a signed velocity.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let count = positions.len();
    if count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (positions[i] - positions[i - 1]) / (current_time - next_time);
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1, keeping the sign of the energy.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

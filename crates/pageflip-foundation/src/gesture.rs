//! Flip-drag gesture interpretation.
//!
//! [`FlipGesture`] consumes one active pointer's positions over time and
//! classifies the gesture on the first move past the touch slop: movement
//! dominated by the flip axis commits to a flip-drag, movement dominated
//! by the cross axis marks the gesture foreign and every later move is
//! ignored until the pointer lifts. This is what keeps a vertical flip
//! container from hijacking a horizontal scroll happening inside it.

use log::debug;

use crate::velocity_tracker::VelocityTracker1D;

/// Axis along which pages fold.
///
/// Fixed at engine construction; a flip container never changes
/// orientation mid-life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Outcome of feeding one pointer move into the interpreter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// Nothing to apply: slop not yet passed, or the gesture is foreign.
    None,
    /// The gesture is a committed flip-drag; apply this flip-distance delta.
    Drag { delta_units: f32 },
}

/// Outcome of a pointer lift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureEnd {
    /// Whether the gesture ever committed to a flip-drag.
    pub was_drag: bool,
    /// Release velocity along the flip axis, pixels/second, clamped.
    pub velocity: f32,
}

/// Stateful interpreter for a single pointer's down/move/up sequence.
///
/// Pixel deltas along the flip axis are normalized into flip-distance
/// units by dividing by `viewport_extent / units_per_page`, so one full
/// viewport of travel equals exactly one page of flip distance.
pub struct FlipGesture {
    orientation: Orientation,
    units_per_page: f32,
    touch_slop: f32,
    max_fling_velocity: f32,
    /// Viewport extent along the flip axis, pixels.
    extent: f32,
    tracker: VelocityTracker1D,
    active: bool,
    dragging: bool,
    foreign: bool,
    down_x: f32,
    down_y: f32,
    last_x: f32,
    last_y: f32,
}

impl FlipGesture {
    pub fn new(
        orientation: Orientation,
        units_per_page: f32,
        touch_slop: f32,
        max_fling_velocity: f32,
    ) -> Self {
        Self {
            orientation,
            units_per_page,
            touch_slop,
            max_fling_velocity,
            extent: 0.0,
            tracker: VelocityTracker1D::new(),
            active: false,
            dragging: false,
            foreign: false,
            down_x: 0.0,
            down_y: 0.0,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    /// Updates the viewport extent along the flip axis.
    pub fn set_extent(&mut self, extent: f32) {
        self.extent = extent;
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether the current gesture has committed to a flip-drag.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether the current gesture was classified as cross-axis movement.
    pub fn is_foreign(&self) -> bool {
        self.foreign
    }

    /// Begins a gesture at the pointer-down position.
    ///
    /// `takeover` skips slop classification entirely: a pointer that lands
    /// while a settle or peek animation is running is an intentional grab
    /// of the in-flight page and starts dragging from the first move.
    pub fn begin(&mut self, x: f32, y: f32, time_ms: i64, takeover: bool) {
        self.active = true;
        self.dragging = takeover;
        self.foreign = false;
        self.down_x = x;
        self.down_y = y;
        self.last_x = x;
        self.last_y = y;
        self.tracker.reset();
        self.tracker.add_sample(time_ms, self.axis_of(x, y));
        if takeover {
            debug!("gesture takeover: dragging from pointer-down");
        }
    }

    /// Feeds a pointer move into the interpreter.
    pub fn on_move(&mut self, x: f32, y: f32, time_ms: i64) -> GestureUpdate {
        if !self.active || self.foreign {
            return GestureUpdate::None;
        }

        self.tracker.add_sample(time_ms, self.axis_of(x, y));

        if !self.dragging {
            let (axis_diff, cross_diff) = match self.orientation {
                Orientation::Vertical => ((y - self.down_y).abs(), (x - self.down_x).abs()),
                Orientation::Horizontal => ((x - self.down_x).abs(), (y - self.down_y).abs()),
            };
            if axis_diff > self.touch_slop && axis_diff > cross_diff {
                // Commit, consuming the slop distance so the page does not jump.
                self.dragging = true;
                self.last_x = x;
                self.last_y = y;
                debug!("gesture committed to flip-drag after {axis_diff}px");
            } else if cross_diff > self.touch_slop {
                self.foreign = true;
                debug!("gesture marked foreign (cross-axis {cross_diff}px)");
            }
            return GestureUpdate::None;
        }

        // Dragging the pointer toward the axis origin advances the flip.
        let delta_px = match self.orientation {
            Orientation::Vertical => self.last_y - y,
            Orientation::Horizontal => self.last_x - x,
        };
        self.last_x = x;
        self.last_y = y;

        if self.extent <= 0.0 {
            return GestureUpdate::None;
        }
        let delta_units = delta_px / (self.extent / self.units_per_page);
        GestureUpdate::Drag { delta_units }
    }

    /// Ends the gesture at pointer lift, reporting the release velocity.
    pub fn end(&mut self, _time_ms: i64) -> GestureEnd {
        let end = GestureEnd {
            was_drag: self.dragging,
            velocity: self.tracker.velocity_clamped(self.max_fling_velocity),
        };
        self.reset();
        end
    }

    /// Abandons the gesture without reporting a release.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.active = false;
        self.dragging = false;
        self.foreign = false;
        self.tracker.reset();
    }

    fn axis_of(&self, x: f32, y: f32) -> f32 {
        match self.orientation {
            Orientation::Vertical => y,
            Orientation::Horizontal => x,
        }
    }
}

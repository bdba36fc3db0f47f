//! The flip engine: authoritative flip distance and everything driven by it.
//!
//! `FlipEngine` owns the single continuous flip-distance scalar and the
//! state around it: the current/target page, the drag gesture, the
//! settle/peek animations, the over-flip policy, and the page cache. It
//! is purely reactive — state only moves inside `apply_drag`,
//! `release_drag`, the programmatic flip calls, and `tick(dt)` — so the
//! whole engine is replayable and testable without a rendering surface.
//!
//! Update order within one cycle: advance animations, resolve page
//! crossing (queueing notifications), derive render parameters, service
//! cache acquisitions, draw. Events queue up during mutation and are
//! drained by the host afterwards via [`FlipEngine::take_events`].

use std::collections::VecDeque;

use log::debug;

use pageflip_animation::{Easing, PeekAnimation, SettleAnimation};
use pageflip_foundation::gesture_constants::{
    MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, PAGING_TOUCH_SLOP,
};
use pageflip_foundation::{FlipGesture, GestureUpdate, Orientation};

use crate::adapter::PageAdapter;
use crate::cache::PageCache;
use crate::error::FlipError;
use crate::events::FlipEvent;
use crate::geometry::{self, FoldParams, UNITS_PER_PAGE};
use crate::overflip::{OverFlipMode, OverFlipper};

/// Settle duration for a single-page flip, milliseconds. Longer flips
/// grow with the square root of the distance, so multi-page jumps gain
/// duration at a diminishing rate.
const SETTLE_BASE_DURATION_MS: f32 = 300.0;

/// Duration of one peek leg (out or back), milliseconds.
const PEEK_LEG_DURATION_MS: f32 = 600.0;

/// Peek amplitude: a quarter page.
const PEEK_AMPLITUDE: f32 = UNITS_PER_PAGE / 4.0;

/// Engine construction options.
#[derive(Debug, Clone, Copy)]
pub struct FlipEngineConfig {
    /// Flip axis; fixed for the engine's lifetime.
    pub orientation: Orientation,
    pub over_flip_mode: OverFlipMode,
    /// Touch slop in pixels before a gesture commits to a flip-drag.
    pub touch_slop: f32,
    /// Release velocity (px/s) below which a release snaps to the
    /// nearest page instead of flinging.
    pub min_fling_velocity: f32,
    /// Cap on release velocity, px/s.
    pub max_fling_velocity: f32,
}

impl Default for FlipEngineConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::Vertical,
            over_flip_mode: OverFlipMode::default(),
            touch_slop: PAGING_TOUCH_SLOP,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}

/// Coarse engine state, derived from the live animation/gesture fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipState {
    Idle,
    Dragging,
    Settling,
    Peeking,
}

/// What the renderer should draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderPass {
    /// At rest: draw a single full page.
    Static { page: usize },
    /// Mid-flip: draw the two static halves and the folding surface.
    Fold(FoldParams),
}

/// Resolves the landing page for a release velocity.
///
/// A fling faster than `min_fling_velocity` lands on the page already
/// being approached in the fling direction (floor for positive pointer
/// velocity, ceil for negative); a soft release snaps to the nearest
/// page. The result is clamped into `[0, page_count)`.
pub fn fling_target(
    velocity: f32,
    min_fling_velocity: f32,
    flip_distance: f32,
    page_count: usize,
) -> i64 {
    let next = if velocity > min_fling_velocity {
        geometry::page_floor(flip_distance)
    } else if velocity < -min_fling_velocity {
        geometry::page_ceil(flip_distance)
    } else {
        geometry::page_round(flip_distance)
    };
    next.clamp(0, page_count.saturating_sub(1) as i64)
}

/// Paged 3-D page-flip engine.
pub struct FlipEngine<A: PageAdapter> {
    adapter: Option<A>,
    page_count: usize,
    current_page: usize,
    current_page_id: u64,
    flip_distance: f32,

    orientation: Orientation,
    gesture: FlipGesture,
    min_fling_velocity: f32,

    settle: Option<SettleAnimation>,
    peek: Option<PeekAnimation>,

    over_flipper: OverFlipper,
    is_over_flipping: bool,

    cache: PageCache<A::Surface>,
    events: VecDeque<FlipEvent>,
}

impl<A: PageAdapter> Default for FlipEngine<A> {
    fn default() -> Self {
        Self::new(FlipEngineConfig::default())
    }
}

impl<A: PageAdapter> FlipEngine<A> {
    pub fn new(config: FlipEngineConfig) -> Self {
        Self {
            adapter: None,
            page_count: 0,
            current_page: 0,
            current_page_id: 0,
            flip_distance: 0.0,
            orientation: config.orientation,
            gesture: FlipGesture::new(
                config.orientation,
                UNITS_PER_PAGE,
                config.touch_slop,
                config.max_fling_velocity,
            ),
            min_fling_velocity: config.min_fling_velocity,
            settle: None,
            peek: None,
            over_flipper: OverFlipper::new(config.over_flip_mode),
            is_over_flipping: false,
            cache: PageCache::new(),
            events: VecDeque::new(),
        }
    }

    // ── adapter & configuration ─────────────────────────────────────────

    /// Attaches a data source, keeping the current position where the new
    /// source still covers it.
    pub fn set_adapter(&mut self, adapter: A) -> Result<(), FlipError> {
        self.cache.invalidate();
        self.cache.set_view_type_count(adapter.type_count())?;
        self.settle = None;
        self.peek = None;

        self.page_count = adapter.count();
        self.current_page = self.current_page.min(self.page_count.saturating_sub(1));
        self.current_page_id = if self.page_count > 0 {
            adapter.item_id(self.current_page)
        } else {
            0
        };
        self.flip_distance = self.flip_distance.clamp(0.0, self.max_flip_distance());
        self.adapter = Some(adapter);
        debug!("adapter attached with {} pages", self.page_count);
        Ok(())
    }

    pub fn adapter(&self) -> Option<&A> {
        self.adapter.as_ref()
    }

    pub fn adapter_mut(&mut self) -> Option<&mut A> {
        self.adapter.as_mut()
    }

    /// The data mutated in place: re-anchor the current page and rebuild
    /// the cache.
    ///
    /// With stable ids the engine relocates the remembered id — current
    /// position first, then a full scan — and hard-jumps there without
    /// animating, so the same item stays on screen. Without stable ids
    /// (or when the id is gone) the raw index is retained, clamped into
    /// the new range.
    pub fn data_set_changed(&mut self) -> Result<(), FlipError> {
        let Some(adapter) = self.adapter.as_ref() else {
            return Ok(());
        };

        let previous_page = self.current_page;
        if adapter.has_stable_ids() {
            self.current_page =
                Self::position_of_id(adapter, self.current_page_id, self.current_page)
                    .unwrap_or(self.current_page);
        }
        self.page_count = adapter.count();
        self.current_page = self.current_page.min(self.page_count.saturating_sub(1));
        self.current_page_id = if self.page_count > 0 {
            adapter.item_id(self.current_page)
        } else {
            0
        };

        let type_count = adapter.type_count();
        self.cache.invalidate();
        self.cache.set_view_type_count(type_count)?;

        if self.current_page != previous_page {
            // Hard jump: the item kept its identity, so apparent
            // continuity means no animation.
            self.settle = None;
            self.peek = None;
            self.flip_distance = self.current_page as f32 * UNITS_PER_PAGE;
        } else {
            self.flip_distance = self.flip_distance.clamp(0.0, self.max_flip_distance());
        }
        debug!(
            "data set changed: {} pages, current page {}",
            self.page_count, self.current_page
        );
        Ok(())
    }

    /// The data source detached: drop everything and degrade to a
    /// zero-page no-op engine.
    pub fn data_set_invalidated(&mut self) {
        self.adapter = None;
        self.page_count = 0;
        self.cache = PageCache::new();
        self.settle = None;
        self.peek = None;
        self.gesture.cancel();
        self.is_over_flipping = false;
        debug!("data set invalidated");
    }

    /// Finds the new position of `id` after a data change; the id is
    /// usually still where it was, so that position is checked before
    /// scanning the whole set.
    fn position_of_id(adapter: &A, id: u64, current: usize) -> Option<usize> {
        let count = adapter.count();
        if current < count && adapter.item_id(current) == id {
            return Some(current);
        }
        (0..count).find(|&position| adapter.item_id(position) == id)
    }

    /// Updates the viewport size in pixels; required before pointer
    /// deltas can be normalized into flip units.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        let extent = match self.orientation {
            Orientation::Vertical => height,
            Orientation::Horizontal => width,
        };
        self.gesture.set_extent(extent);
    }

    pub fn set_over_flip_mode(&mut self, mode: OverFlipMode) {
        self.over_flipper = OverFlipper::new(mode);
        self.is_over_flipping = false;
    }

    pub fn over_flip_mode(&self) -> OverFlipMode {
        self.over_flipper.mode()
    }

    // ── accessors ───────────────────────────────────────────────────────

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn current_page_id(&self) -> u64 {
        self.current_page_id
    }

    pub fn flip_distance(&self) -> f32 {
        self.flip_distance
    }

    pub fn is_flipping_vertically(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Edge-glow intensity in `[0, 1]` for the Glow over-flip mode.
    pub fn glow_intensity(&self) -> f32 {
        self.over_flipper.glow_intensity()
    }

    pub fn state(&self) -> FlipState {
        if self.gesture.is_dragging() {
            FlipState::Dragging
        } else if self.settle.is_some() {
            FlipState::Settling
        } else if self.peek.is_some() {
            FlipState::Peeking
        } else {
            FlipState::Idle
        }
    }

    /// Drains all notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<FlipEvent> {
        self.events.drain(..).collect()
    }

    // ── programmatic flips ──────────────────────────────────────────────

    /// Jumps to `page` immediately, without animating.
    pub fn flip_to(&mut self, page: i64) -> Result<(), FlipError> {
        if self.adapter.is_none() {
            return Ok(());
        }
        self.validate_page(page)?;
        self.settle = None;
        self.peek = None;
        self.flip_distance = page as f32 * UNITS_PER_PAGE;
        Ok(())
    }

    /// Jumps `delta` pages from the current page.
    pub fn flip_by(&mut self, delta: i64) -> Result<(), FlipError> {
        self.flip_to(self.current_page as i64 + delta)
    }

    /// Animates to `page` with a ballistic settle.
    pub fn smooth_flip_to(&mut self, page: i64) -> Result<(), FlipError> {
        if self.adapter.is_none() {
            return Ok(());
        }
        self.validate_page(page)?;
        self.start_settle(page);
        Ok(())
    }

    /// Animates `delta` pages from the current page.
    pub fn smooth_flip_by(&mut self, delta: i64) -> Result<(), FlipError> {
        self.smooth_flip_to(self.current_page as i64 + delta)
    }

    /// Hints that a next page exists. No-op on the last page.
    pub fn peek_next(&mut self, once: bool) {
        if self.current_page + 1 < self.page_count {
            self.start_peek(PEEK_AMPLITUDE, once);
        }
    }

    /// Hints that a previous page exists. No-op on the first page.
    pub fn peek_previous(&mut self, once: bool) {
        if self.current_page > 0 {
            self.start_peek(-PEEK_AMPLITUDE, once);
        }
    }

    // ── gesture input ───────────────────────────────────────────────────

    /// Pointer landed. Interrupts any in-flight settle or peek; the
    /// interrupted animation makes the new gesture a takeover that drags
    /// without waiting for slop.
    pub fn pointer_down(&mut self, x: f32, y: f32, time_ms: i64) {
        let takeover = self.settle.is_some() || self.peek.is_some();
        self.settle = None;
        self.peek = None;
        self.gesture.begin(x, y, time_ms, takeover);
    }

    /// Pointer moved. Returns whether the flip distance changed.
    pub fn pointer_move(&mut self, x: f32, y: f32, time_ms: i64) -> bool {
        match self.gesture.on_move(x, y, time_ms) {
            GestureUpdate::Drag { delta_units } => {
                self.apply_drag(delta_units);
                true
            }
            GestureUpdate::None => false,
        }
    }

    /// Pointer lifted. A committed flip-drag resolves its landing page
    /// from the release velocity and settles there.
    pub fn pointer_up(&mut self, time_ms: i64) {
        let end = self.gesture.end(time_ms);
        if end.was_drag {
            self.release_drag(end.velocity);
        }
    }

    /// Adds `delta_units` to the flip distance, reclamping through the
    /// over-flip policy at the boundaries.
    ///
    /// Queues an over-flip event while out of bounds, and one
    /// zero-magnitude event per edge when the boundary is re-crossed
    /// inward.
    pub fn apply_drag(&mut self, delta_units: f32) {
        if self.page_count < 1 {
            return;
        }
        self.settle = None;
        self.peek = None;

        self.flip_distance += delta_units;
        let min = 0.0;
        let max = self.max_flip_distance();
        let out_of_bounds = self.flip_distance < min || self.flip_distance > max;
        self.flip_distance = self.over_flipper.calculate(self.flip_distance, min, max);

        if out_of_bounds {
            self.is_over_flipping = true;
            let total = self.over_flipper.total_over_flip();
            self.events.push_back(FlipEvent::OverFlip {
                mode: self.over_flipper.mode(),
                flipping_previous: total < 0.0,
                over_flip_distance: total.abs(),
                flip_distance_per_page: UNITS_PER_PAGE,
            });
        } else if self.is_over_flipping {
            self.is_over_flipping = false;
            for flipping_previous in [false, true] {
                self.events.push_back(FlipEvent::OverFlip {
                    mode: self.over_flipper.mode(),
                    flipping_previous,
                    over_flip_distance: 0.0,
                    flip_distance_per_page: UNITS_PER_PAGE,
                });
            }
        }
    }

    /// Ends a drag with the given release velocity (px/s) and settles on
    /// the resolved landing page.
    pub fn release_drag(&mut self, velocity: f32) {
        if self.page_count < 1 {
            return;
        }
        let target = fling_target(
            velocity,
            self.min_fling_velocity,
            self.flip_distance,
            self.page_count,
        );
        self.start_settle(target);
        self.over_flipper.gesture_ended();
        self.is_over_flipping = false;
    }

    // ── frame advance ───────────────────────────────────────────────────

    /// Advances whichever animation is active by `dt_ms` and resolves
    /// page crossings. Returns whether another frame should be drawn.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.page_count < 1 {
            return false;
        }

        let mut needs_redraw = false;
        if let Some(settle) = &mut self.settle {
            self.flip_distance = settle.tick(dt_ms);
            needs_redraw = true;
            if settle.is_finished() {
                self.settle = None;
            }
        } else if let Some(peek) = &mut self.peek {
            self.flip_distance = peek.tick(dt_ms);
            needs_redraw = true;
            if peek.is_finished() {
                self.peek = None;
            }
        }

        needs_redraw |= self.over_flipper.tick(dt_ms);

        if !self.gesture.is_dragging() && self.settle.is_none() && self.peek.is_none() {
            self.sync_current_page();
        }
        needs_redraw
    }

    // ── rendering interface ─────────────────────────────────────────────

    /// Names what to draw for the current flip distance, or `None` when
    /// there are no pages.
    pub fn render_state(&self) -> Option<RenderPass> {
        if self.page_count < 1 {
            return None;
        }
        let mid_flip = self.gesture.is_dragging()
            || self.settle.is_some()
            || self.peek.is_some()
            || self.is_over_flipping
            || geometry::degrees_flipped(self.flip_distance) != 0.0;
        if mid_flip {
            Some(RenderPass::Fold(geometry::fold_params(
                self.flip_distance,
                self.orientation,
            )))
        } else {
            let page = geometry::page_floor(self.flip_distance)
                .clamp(0, self.page_count.saturating_sub(1) as i64) as usize;
            Some(RenderPass::Static { page })
        }
    }

    /// Realizes the content surface for `page` through the cache.
    ///
    /// Returns `None` for pages outside `[0, page_count)` — reachable
    /// while rubber-band over-flipping names a page past the edge — which
    /// the renderer simply skips.
    pub fn surface_for(&mut self, page: i64) -> Option<&A::Surface> {
        if page < 0 || page as usize >= self.page_count {
            return None;
        }
        let position = page as usize;
        let adapter = self.adapter.as_mut()?;
        let view_type = adapter.view_type(position);
        Some(self.cache.acquire(position, view_type, |recycled| {
            adapter.populate(position, recycled)
        }))
    }

    // ── internals ───────────────────────────────────────────────────────

    fn max_flip_distance(&self) -> f32 {
        self.page_count.saturating_sub(1) as f32 * UNITS_PER_PAGE
    }

    fn validate_page(&self, page: i64) -> Result<(), FlipError> {
        if page < 0 || page as usize >= self.page_count {
            return Err(FlipError::PageOutOfRange {
                page,
                page_count: self.page_count,
            });
        }
        Ok(())
    }

    fn start_settle(&mut self, page: i64) {
        self.peek = None;
        let target = page as f32 * UNITS_PER_PAGE;
        let delta = target - self.flip_distance;
        let duration = SETTLE_BASE_DURATION_MS * (delta.abs() / UNITS_PER_PAGE).sqrt();
        self.settle = Some(SettleAnimation::new(
            self.flip_distance,
            target,
            duration,
            Easing::Decelerate,
        ));
    }

    fn start_peek(&mut self, amplitude: f32, once: bool) {
        self.settle = None;
        self.peek = Some(PeekAnimation::new(
            self.current_page as f32 * UNITS_PER_PAGE,
            amplitude,
            PEEK_LEG_DURATION_MS,
            once,
        ));
    }

    fn sync_current_page(&mut self) {
        let page = geometry::page_floor(self.flip_distance)
            .clamp(0, self.page_count.saturating_sub(1) as i64) as usize;
        if page != self.current_page {
            self.current_page = page;
            self.current_page_id = self
                .adapter
                .as_ref()
                .map(|adapter| adapter.item_id(page))
                .unwrap_or(0);
            self.events.push_back(FlipEvent::FlippedToPage {
                page,
                id: self.current_page_id,
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;

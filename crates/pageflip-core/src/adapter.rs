//! Data-source contract for page content.

/// Provides page count, identity, and content surfaces to the engine.
///
/// The surface type is whatever the host renders — a texture handle, a
/// retained widget, a pixel buffer. The engine only moves surfaces
/// between the active window and the scrap pool and hands recycled ones
/// back through [`PageAdapter::populate`] for refresh.
///
/// Implementations with a single view type and index-stable ids can rely
/// on the defaults and only implement `count` and `populate`.
pub trait PageAdapter {
    type Surface;

    /// Total number of pages.
    fn count(&self) -> usize;

    /// Whether `item_id` stays attached to an item across data changes.
    ///
    /// With stable ids the engine re-anchors the current page by id after
    /// `data_set_changed`; without them it retains the raw index.
    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Stable identity of the item at `position`.
    fn item_id(&self, position: usize) -> u64 {
        position as u64
    }

    /// View-type tag of the item at `position`, in `[0, type_count)`.
    ///
    /// Surfaces are only recycled between positions of the same type.
    fn view_type(&self, position: usize) -> usize {
        let _ = position;
        0
    }

    /// Number of distinct view types. Must be at least 1.
    fn type_count(&self) -> usize {
        1
    }

    /// Produces the content surface for `position`.
    ///
    /// `recycled` is a scrap surface of the same view type when one is
    /// available; the adapter repopulates it instead of building a new
    /// surface from scratch.
    fn populate(&mut self, position: usize, recycled: Option<Self::Surface>) -> Self::Surface;
}

//! Bounded recycling store for realized page surfaces.
//!
//! Rendering a fold needs at most the previous, current, and next page at
//! once, so the active window holds exactly three surfaces. Everything
//! pushed out lands in a per-view-type scrap pool and is handed back to
//! the adapter for repopulation on the next acquisition. A surface lives
//! in the active window or the scrap pool, never both.

use indexmap::IndexMap;
use log::trace;
use smallvec::SmallVec;

use crate::error::FlipError;

/// Previous, current, and next page surfaces.
pub const ACTIVE_CAPACITY: usize = 3;

struct ActivePage<S> {
    position: usize,
    view_type: usize,
    surface: S,
}

/// Fixed-capacity page store with a type-keyed scrap pool.
pub struct PageCache<S> {
    /// Insertion-ordered; most recently used at the back.
    active: SmallVec<[ActivePage<S>; ACTIVE_CAPACITY]>,
    /// One position→surface pool per view type. Insertion-ordered so the
    /// fallback victim is the last surface scrapped.
    scrap: Vec<IndexMap<usize, S>>,
}

impl<S> Default for PageCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> PageCache<S> {
    /// An empty cache with a single view type.
    pub fn new() -> Self {
        Self {
            active: SmallVec::new(),
            scrap: vec![IndexMap::new()],
        }
    }

    /// Re-partitions the scrap pool for `view_type_count` types.
    ///
    /// Existing scrap is dropped; surfaces pooled under the old
    /// partitioning cannot be trusted to carry the right type.
    pub fn set_view_type_count(&mut self, view_type_count: usize) -> Result<(), FlipError> {
        if view_type_count < 1 {
            return Err(FlipError::InvalidTypeCount(view_type_count));
        }
        self.scrap = (0..view_type_count).map(|_| IndexMap::new()).collect();
        Ok(())
    }

    /// Returns the surface for `position`, realizing it on demand.
    ///
    /// An active hit is promoted to most-recently-used and returned as-is.
    /// Otherwise `populate` is called with a scrap surface of the matching
    /// view type when one exists (exact position preferred, else the last
    /// scrapped), and the result joins the active window, evicting the
    /// oldest entry to scrap if the window is full.
    pub fn acquire(
        &mut self,
        position: usize,
        view_type: usize,
        populate: impl FnOnce(Option<S>) -> S,
    ) -> &S {
        if let Some(index) = self.active.iter().position(|p| p.position == position) {
            let page = self.active.remove(index);
            self.active.push(page);
            return &self.active.last().expect("just pushed").surface;
        }

        let recycled = self.take_scrap(position, view_type);
        let surface = populate(recycled);

        self.active.push(ActivePage {
            position,
            view_type,
            surface,
        });
        if self.active.len() > ACTIVE_CAPACITY {
            let evicted = self.active.remove(0);
            trace!("evicting page {} to scrap", evicted.position);
            self.scrap_pool_mut(evicted.view_type)
                .insert(evicted.position, evicted.surface);
        }

        &self.active.last().expect("just pushed").surface
    }

    /// Clears the active window and every scrap pool (data-source reset).
    pub fn invalidate(&mut self) {
        self.active.clear();
        for pool in &mut self.scrap {
            pool.clear();
        }
    }

    /// Active positions in least- to most-recently-used order.
    pub fn active_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.active.iter().map(|p| p.position)
    }

    /// Whether a scrap surface is pooled for exactly this position.
    pub fn scrap_contains(&self, view_type: usize, position: usize) -> bool {
        self.scrap
            .get(self.pool_index(view_type))
            .is_some_and(|pool| pool.contains_key(&position))
    }

    /// Total surfaces currently pooled as scrap.
    pub fn scrap_len(&self) -> usize {
        self.scrap.iter().map(|pool| pool.len()).sum()
    }

    fn take_scrap(&mut self, position: usize, view_type: usize) -> Option<S> {
        let pool = self.scrap_pool_mut(view_type);
        // shift_remove keeps insertion order intact for the fallback pick.
        if let Some(surface) = pool.shift_remove(&position) {
            return Some(surface);
        }
        pool.pop().map(|(_, surface)| surface)
    }

    fn pool_index(&self, view_type: usize) -> usize {
        if self.scrap.len() == 1 {
            0
        } else {
            view_type
        }
    }

    fn scrap_pool_mut(&mut self, view_type: usize) -> &mut IndexMap<usize, S> {
        let index = self.pool_index(view_type);
        &mut self.scrap[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Supplier that records whether it was handed a recycled surface.
    fn fresh(position: usize) -> impl FnOnce(Option<String>) -> String {
        move |recycled| {
            assert!(recycled.is_none(), "expected fresh build for {position}");
            format!("page-{position}")
        }
    }

    #[test]
    fn test_fourth_acquire_evicts_oldest_to_scrap() {
        let mut cache = PageCache::new();
        for position in 0..4 {
            cache.acquire(position, 0, fresh(position));
        }

        assert_eq!(cache.active_positions().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(cache.scrap_contains(0, 0));
        assert_eq!(cache.scrap_len(), 1);
    }

    #[test]
    fn test_reacquire_takes_scrap_reuse_path() {
        let mut cache = PageCache::new();
        for position in 0..4 {
            cache.acquire(position, 0, fresh(position));
        }

        let mut reused = false;
        let surface = cache.acquire(0, 0, |recycled| {
            reused = recycled.is_some();
            recycled.unwrap()
        });
        assert!(reused, "page 0 should come back from scrap");
        assert_eq!(surface, "page-0");
        assert_eq!(cache.scrap_len(), 1); // page 1 took its place
        assert!(cache.scrap_contains(0, 1));
    }

    #[test]
    fn test_active_hit_promotes_to_mru() {
        let mut cache = PageCache::new();
        for position in 0..3 {
            cache.acquire(position, 0, fresh(position));
        }

        // Touch page 0; page 1 becomes the eviction victim.
        cache.acquire(0, 0, |_| unreachable!("active hit must not repopulate"));
        cache.acquire(3, 0, fresh(3));

        assert_eq!(cache.active_positions().collect::<Vec<_>>(), vec![2, 0, 3]);
        assert!(cache.scrap_contains(0, 1));
    }

    #[test]
    fn test_fallback_scrap_is_last_inserted() {
        let mut cache = PageCache::new();
        for position in 0..5 {
            cache.acquire(position, 0, fresh(position));
        }
        // Scrap now holds pages 0 then 1, in that insertion order.
        let surface = cache.acquire(9, 0, |recycled| recycled.unwrap());
        assert_eq!(surface, "page-1", "retrofit should take the last scrapped");
        assert!(cache.scrap_contains(0, 0));
    }

    #[test]
    fn test_type_partitioned_scrap() {
        let mut cache = PageCache::new();
        cache.set_view_type_count(2).unwrap();

        for position in 0..4 {
            cache.acquire(position, position % 2, |_| format!("page-{position}"));
        }
        // Page 0 (type 0) was evicted; a type-1 acquisition must not see it.
        let surface = cache.acquire(7, 1, |recycled| {
            assert!(recycled.is_none());
            "page-7".to_string()
        });
        assert_eq!(surface, "page-7");

        // A type-0 acquisition does.
        let surface = cache.acquire(8, 0, |recycled| recycled.unwrap());
        assert_eq!(surface, "page-0");
    }

    #[test]
    fn test_invalid_type_count_rejected() {
        let mut cache: PageCache<String> = PageCache::new();
        assert_eq!(
            cache.set_view_type_count(0),
            Err(FlipError::InvalidTypeCount(0))
        );
    }

    #[test]
    fn test_invalidate_clears_everything() {
        let mut cache = PageCache::new();
        for position in 0..4 {
            cache.acquire(position, 0, fresh(position));
        }
        cache.invalidate();
        assert_eq!(cache.active_positions().count(), 0);
        assert_eq!(cache.scrap_len(), 0);
    }
}

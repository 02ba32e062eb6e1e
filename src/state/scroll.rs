//! Viewport Scroll State - Page offset and visibility observation
//!
//! The page is one tall column; the terminal shows a window of it. This
//! module owns that window:
//! - Scroll offset (clamped to the content bounds)
//! - Scroll operations (line, wheel, page, top/bottom)
//! - Block regions in page coordinates (written by layout)
//! - Observation subscriptions: live observers get their block's visible
//!   fraction on every `notify()`
//!
//! Observers are released by dropping their [`ObserverHandle`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use spark_signals::{signal, Signal};

use crate::types::BlockKey;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Scroll amount for arrow keys (lines).
pub const LINE_SCROLL: i32 = 1;

/// Scroll amount for mouse wheel.
pub const WHEEL_SCROLL: i32 = 3;

/// Page Up/Down scrolls 90% of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

// =============================================================================
// REGIONS
// =============================================================================

/// Vertical extent of a block in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub y: u16,
    pub height: u16,
}

impl Region {
    pub const fn new(y: u16, height: u16) -> Self {
        Self { y, height }
    }
}

/// Fraction of `region` inside the window `[offset, offset + viewport_height)`.
///
/// Zero-height regions are never visible.
pub fn visible_fraction(region: Region, offset: u16, viewport_height: u16) -> f32 {
    if region.height == 0 || viewport_height == 0 {
        return 0.0;
    }
    let top = region.y.max(offset) as u32;
    let bottom = (region.y as u32 + region.height as u32).min(offset as u32 + viewport_height as u32);
    if bottom <= top {
        return 0.0;
    }
    (bottom - top) as f32 / region.height as f32
}

// =============================================================================
// OBSERVER TABLE
// =============================================================================

#[derive(Default)]
struct ObserverTable {
    regions: HashMap<BlockKey, Region>,
    observers: HashMap<BlockKey, u64>,
    next_token: u64,
}

/// Subscription for one block's visibility. Dropping it unsubscribes.
#[must_use = "dropping an ObserverHandle ends the observation"]
pub struct ObserverHandle {
    key: BlockKey,
    token: u64,
    table: Weak<RefCell<ObserverTable>>,
}

impl ObserverHandle {
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn is_active(&self) -> bool {
        self.table
            .upgrade()
            .map(|t| t.borrow().observers.get(&self.key) == Some(&self.token))
            .unwrap_or(false)
    }
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            let mut table = table.borrow_mut();
            // Only remove our own subscription, not a newer one for the same key
            if table.observers.get(&self.key) == Some(&self.token) {
                table.observers.remove(&self.key);
            }
        }
    }
}

impl std::fmt::Debug for ObserverHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverHandle")
            .field("key", &self.key)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// VIEWPORT
// =============================================================================

pub struct Viewport {
    offset: Signal<u16>,
    height: u16,
    content_height: u16,
    table: Rc<RefCell<ObserverTable>>,
}

impl Viewport {
    pub fn new(height: u16) -> Self {
        Self {
            offset: signal(0),
            height,
            content_height: 0,
            table: Rc::new(RefCell::new(ObserverTable::default())),
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn offset(&self) -> u16 {
        self.offset.get()
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.height)
    }

    /// Update the window height (terminal resize). Re-clamps the offset.
    pub fn set_height(&mut self, height: u16) {
        self.height = height;
        self.clamp();
    }

    /// Update the page height (after layout). Re-clamps the offset.
    pub fn set_content_height(&mut self, content_height: u16) {
        self.content_height = content_height;
        self.clamp();
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        if self.offset.get() > max {
            self.offset.set(max);
        }
    }

    // -------------------------------------------------------------------------
    // Scroll operations
    // -------------------------------------------------------------------------

    /// Set the offset (clamped). Returns `true` if it changed.
    pub fn scroll_to(&mut self, offset: u16) -> bool {
        let clamped = offset.min(self.max_offset());
        if clamped == self.offset.get() {
            return false;
        }
        self.offset.set(clamped);
        true
    }

    /// Scroll by a delta. Returns `false` if already at the boundary.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (self.offset.get() as i32 + delta).clamp(0, self.max_offset() as i32);
        self.scroll_to(target as u16)
    }

    fn page_rows(&self) -> i32 {
        ((self.height as f32 * PAGE_SCROLL_FACTOR) as i32).max(1)
    }

    pub fn page_down(&mut self) -> bool {
        self.scroll_by(self.page_rows())
    }

    pub fn page_up(&mut self) -> bool {
        self.scroll_by(-self.page_rows())
    }

    pub fn scroll_to_top(&mut self) -> bool {
        self.scroll_to(0)
    }

    pub fn scroll_to_bottom(&mut self) -> bool {
        self.scroll_to(self.max_offset())
    }

    // -------------------------------------------------------------------------
    // Regions & observation
    // -------------------------------------------------------------------------

    /// Record where a block sits on the page.
    pub fn set_region(&mut self, key: BlockKey, region: Region) {
        self.table.borrow_mut().regions.insert(key, region);
    }

    pub fn region(&self, key: &BlockKey) -> Option<Region> {
        self.table.borrow().regions.get(key).copied()
    }

    pub fn clear_regions(&mut self) {
        self.table.borrow_mut().regions.clear();
    }

    /// Visible fraction of a block at the current offset (0.0 if unknown).
    pub fn fraction_of(&self, key: &BlockKey) -> f32 {
        self.region(key)
            .map(|r| visible_fraction(r, self.offset(), self.height))
            .unwrap_or(0.0)
    }

    /// Subscribe to visibility observations for `key`.
    ///
    /// A newer subscription for the same key supersedes the older one.
    pub fn observe(&mut self, key: BlockKey) -> ObserverHandle {
        let mut table = self.table.borrow_mut();
        let token = table.next_token;
        table.next_token += 1;
        table.observers.insert(key.clone(), token);

        ObserverHandle {
            key,
            token,
            table: Rc::downgrade(&self.table),
        }
    }

    pub fn observer_count(&self) -> usize {
        self.table.borrow().observers.len()
    }

    /// Current observation for every live observer whose region is known.
    ///
    /// Sorted by key for deterministic delivery.
    pub fn notify(&self) -> Vec<(BlockKey, f32)> {
        let table = self.table.borrow();
        let offset = self.offset();
        let mut observations: Vec<(BlockKey, f32)> = table
            .observers
            .keys()
            .filter_map(|key| {
                table
                    .regions
                    .get(key)
                    .map(|r| (key.clone(), visible_fraction(*r, offset, self.height)))
            })
            .collect();
        observations.sort_by(|a, b| a.0.cmp(&b.0));
        observations
    }
}

impl std::fmt::Debug for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewport")
            .field("offset", &self.offset())
            .field("height", &self.height)
            .field("content_height", &self.content_height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(height: u16, content: u16) -> Viewport {
        let mut vp = Viewport::new(height);
        vp.set_content_height(content);
        vp
    }

    #[test]
    fn test_visible_fraction() {
        let r = Region::new(10, 10);
        assert_eq!(visible_fraction(r, 0, 10), 0.0);
        assert_eq!(visible_fraction(r, 0, 11), 0.1);
        assert_eq!(visible_fraction(r, 5, 10), 0.5);
        assert_eq!(visible_fraction(r, 10, 10), 1.0);
        assert_eq!(visible_fraction(r, 0, 100), 1.0);
        assert_eq!(visible_fraction(r, 19, 10), 0.1);
        assert_eq!(visible_fraction(r, 20, 10), 0.0);
    }

    #[test]
    fn test_visible_fraction_degenerate() {
        assert_eq!(visible_fraction(Region::new(0, 0), 0, 24), 0.0);
        assert_eq!(visible_fraction(Region::new(0, 5), 0, 0), 0.0);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut vp = viewport(10, 30);
        assert!(!vp.scroll_by(-1));
        assert!(vp.scroll_by(5));
        assert_eq!(vp.offset(), 5);
        assert!(vp.scroll_by(100));
        assert_eq!(vp.offset(), 20);
        assert!(!vp.scroll_by(1));
    }

    #[test]
    fn test_page_scroll() {
        let mut vp = viewport(20, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 18);
        vp.page_up();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_top_bottom() {
        let mut vp = viewport(10, 50);
        assert!(vp.scroll_to_bottom());
        assert_eq!(vp.offset(), 40);
        assert!(vp.scroll_to_top());
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_content_shorter_than_viewport() {
        let mut vp = viewport(40, 10);
        assert_eq!(vp.max_offset(), 0);
        assert!(!vp.page_down());
    }

    #[test]
    fn test_resize_reclamps() {
        let mut vp = viewport(10, 50);
        vp.scroll_to_bottom();
        vp.set_height(30);
        assert_eq!(vp.offset(), 20);
        vp.set_content_height(25);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_observe_and_notify() {
        let mut vp = viewport(10, 100);
        vp.set_region(BlockKey::from("a"), Region::new(0, 5));
        vp.set_region(BlockKey::from("b"), Region::new(50, 10));
        vp.set_region(BlockKey::from("c"), Region::new(5, 10));

        let _a = vp.observe(BlockKey::from("a"));
        let _b = vp.observe(BlockKey::from("b"));

        let obs = vp.notify();
        assert_eq!(
            obs,
            vec![(BlockKey::from("a"), 1.0), (BlockKey::from("b"), 0.0)]
        );
    }

    #[test]
    fn test_observer_without_region_is_silent() {
        let mut vp = viewport(10, 100);
        let _h = vp.observe(BlockKey::from("nowhere"));
        assert!(vp.notify().is_empty());
        assert_eq!(vp.fraction_of(&BlockKey::from("nowhere")), 0.0);
    }

    #[test]
    fn test_drop_handle_unsubscribes() {
        let mut vp = viewport(10, 100);
        vp.set_region(BlockKey::from("a"), Region::new(0, 5));
        let handle = vp.observe(BlockKey::from("a"));
        assert!(handle.is_active());
        assert_eq!(vp.observer_count(), 1);

        drop(handle);
        assert_eq!(vp.observer_count(), 0);
        assert!(vp.notify().is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_remove_newer_subscription() {
        let mut vp = viewport(10, 100);
        let old = vp.observe(BlockKey::from("a"));
        let new = vp.observe(BlockKey::from("a"));
        assert!(!old.is_active());

        drop(old);
        assert!(new.is_active());
        assert_eq!(vp.observer_count(), 1);
    }
}

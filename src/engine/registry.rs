//! Block Registry - ContentBlock lifecycle.
//!
//! A content block is created when the page mounts it and destroyed when the
//! page unmounts it. Each block owns:
//! - A [`RevealController`] (the one-shot latch)
//! - While still hidden, an [`ObserverHandle`] on the viewport
//!
//! The observation subscription is released as soon as the block reveals,
//! since the latch never re-evaluates. Re-mounting a block that already
//! exists (page rebuilt after a resize) keeps its latch and reveal instant,
//! so the enter transition is never replayed.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::state::reveal::{RevealController, RevealSpec, RevealStyle, RevealTrigger};
use crate::state::scroll::{ObserverHandle, Viewport};
use crate::types::BlockKey;

// =============================================================================
// Content Block
// =============================================================================

#[derive(Debug)]
pub struct ContentBlock {
    key: BlockKey,
    spec: RevealSpec,
    controller: RevealController,
    observer: Option<ObserverHandle>,
}

impl ContentBlock {
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn spec(&self) -> &RevealSpec {
        &self.spec
    }

    pub fn is_revealed(&self) -> bool {
        self.controller.is_revealed()
    }

    pub fn controller(&self) -> &RevealController {
        &self.controller
    }

    /// Whether the block still holds a visibility subscription.
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    pub fn style(&self, now: Duration) -> RevealStyle {
        self.controller.style(&self.spec, now)
    }
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Default)]
pub struct BlockRegistry {
    blocks: BTreeMap<BlockKey, ContentBlock>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a block. Returns `true` if it was newly created.
    ///
    /// An existing block keeps its state; only its spec is refreshed.
    pub fn mount(&mut self, key: BlockKey, spec: RevealSpec, viewport: &mut Viewport, now: Duration) -> bool {
        if let Some(block) = self.blocks.get_mut(&key) {
            block.spec = spec;
            return false;
        }

        let mut controller = match spec.trigger {
            RevealTrigger::InView { threshold } => RevealController::new(threshold),
            RevealTrigger::Mount => RevealController::new(0.0),
        };

        let observer = match spec.trigger {
            RevealTrigger::InView { .. } => Some(viewport.observe(key.clone())),
            RevealTrigger::Mount => {
                controller.reveal_now(now);
                None
            }
        };

        self.blocks.insert(
            key.clone(),
            ContentBlock {
                key,
                spec,
                controller,
                observer,
            },
        );
        true
    }

    /// Mount every block in `specs` and unmount blocks not listed.
    pub fn sync(&mut self, specs: &[(BlockKey, RevealSpec)], viewport: &mut Viewport, now: Duration) {
        let stale: Vec<BlockKey> = self
            .blocks
            .keys()
            .filter(|key| !specs.iter().any(|(k, _)| k == *key))
            .cloned()
            .collect();
        for key in stale {
            self.unmount(&key);
        }

        for (key, spec) in specs {
            self.mount(key.clone(), *spec, viewport, now);
        }
    }

    /// Destroy a block, releasing its subscription.
    pub fn unmount(&mut self, key: &BlockKey) -> Option<ContentBlock> {
        let block = self.blocks.remove(key);
        if block.is_some() {
            debug!(%key, "block unmounted");
        }
        block
    }

    /// Feed one observation to `key`. Returns `true` if it revealed the block.
    pub fn observe(&mut self, key: &BlockKey, fraction: f32, now: Duration) -> bool {
        let Some(block) = self.blocks.get_mut(key) else {
            return false;
        };
        if !block.controller.observe(fraction, now) {
            return false;
        }
        // Latch closed: stop observing
        block.observer = None;
        debug!(%key, fraction, "block revealed");
        true
    }

    /// Feed a batch of observations. Returns the keys revealed by it.
    pub fn deliver(&mut self, observations: &[(BlockKey, f32)], now: Duration) -> Vec<BlockKey> {
        observations
            .iter()
            .filter(|(key, fraction)| self.observe(key, *fraction, now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub fn get(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.blocks.get(key)
    }

    pub fn is_revealed(&self, key: &BlockKey) -> bool {
        self.blocks.get(key).map(ContentBlock::is_revealed).unwrap_or(false)
    }

    /// Visual state of `key` at `now`; unknown keys render as shown.
    pub fn reveal_style(&self, key: &BlockKey, now: Duration) -> RevealStyle {
        self.blocks
            .get(key)
            .map(|block| block.style(now))
            .unwrap_or(RevealStyle::SHOWN)
    }

    /// Whether any enter transition is in flight at `now`.
    pub fn is_animating(&self, now: Duration) -> bool {
        self.blocks
            .values()
            .any(|block| block.controller.is_animating(&block.spec, now))
    }

    /// Number of blocks still waiting to reveal.
    pub fn pending(&self) -> usize {
        self.blocks.values().filter(|b| !b.is_revealed()).count()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::reveal::RevealMotion;
    use crate::state::scroll::Region;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn in_view(threshold: f32) -> RevealSpec {
        RevealSpec::in_view(threshold, RevealMotion::SlideUp(3), ms(800))
    }

    fn setup() -> (BlockRegistry, Viewport) {
        let mut viewport = Viewport::new(10);
        viewport.set_content_height(100);
        (BlockRegistry::new(), viewport)
    }

    #[test]
    fn test_mount_subscribes() {
        let (mut registry, mut viewport) = setup();
        assert!(registry.mount(BlockKey::from("a"), in_view(0.1), &mut viewport, ms(0)));
        assert_eq!(viewport.observer_count(), 1);
        assert!(registry.get(&BlockKey::from("a")).unwrap().is_observing());
        assert_eq!(registry.pending(), 1);
    }

    #[test]
    fn test_mount_trigger_reveals_immediately() {
        let (mut registry, mut viewport) = setup();
        let spec = RevealSpec::on_mount(RevealMotion::SlideUp(2), ms(800));
        registry.mount(BlockKey::from("hero"), spec, &mut viewport, ms(50));

        let block = registry.get(&BlockKey::from("hero")).unwrap();
        assert!(block.is_revealed());
        assert!(!block.is_observing());
        assert_eq!(block.controller().revealed_at(), Some(ms(50)));
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_deliver_reveals_and_unsubscribes() {
        let (mut registry, mut viewport) = setup();
        let key = BlockKey::from("a");
        viewport.set_region(key.clone(), Region::new(5, 10));
        registry.mount(key.clone(), in_view(0.1), &mut viewport, ms(0));

        let revealed = registry.deliver(&viewport.notify(), ms(16));
        assert_eq!(revealed, vec![key.clone()]);
        assert!(registry.is_revealed(&key));
        assert_eq!(viewport.observer_count(), 0);
        assert!(viewport.notify().is_empty());
    }

    #[test]
    fn test_never_visible_block_stays_hidden() {
        let (mut registry, mut viewport) = setup();
        let key = BlockKey::from("far");
        viewport.set_region(key.clone(), Region::new(80, 10));
        registry.mount(key.clone(), in_view(0.1), &mut viewport, ms(0));

        for t in 0..100 {
            registry.deliver(&viewport.notify(), ms(t * 16));
        }
        assert!(!registry.is_revealed(&key));
        let style = registry.reveal_style(&key, ms(10_000));
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.offset_rows, 3);
    }

    #[test]
    fn test_remount_keeps_latch() {
        let (mut registry, mut viewport) = setup();
        let key = BlockKey::from("a");
        viewport.set_region(key.clone(), Region::new(0, 5));
        registry.mount(key.clone(), in_view(0.1), &mut viewport, ms(0));
        registry.deliver(&viewport.notify(), ms(100));

        // Page rebuilt later
        assert!(!registry.mount(key.clone(), in_view(0.1), &mut viewport, ms(5000)));
        let block = registry.get(&key).unwrap();
        assert_eq!(block.controller().revealed_at(), Some(ms(100)));
        assert!(block.style(ms(5000)).is_settled());
        assert_eq!(viewport.observer_count(), 0);
    }

    #[test]
    fn test_sync_unmounts_stale_blocks() {
        let (mut registry, mut viewport) = setup();
        registry.mount(BlockKey::from("a"), in_view(0.1), &mut viewport, ms(0));
        registry.mount(BlockKey::from("b"), in_view(0.1), &mut viewport, ms(0));
        assert_eq!(viewport.observer_count(), 2);

        registry.sync(&[(BlockKey::from("b"), in_view(0.1))], &mut viewport, ms(0));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(&BlockKey::from("a")).is_none());
        assert_eq!(viewport.observer_count(), 1);
    }

    #[test]
    fn test_observe_below_threshold() {
        let (mut registry, mut viewport) = setup();
        let key = BlockKey::from("skill");
        registry.mount(key.clone(), in_view(0.5), &mut viewport, ms(0));

        assert!(!registry.observe(&key, 0.4, ms(10)));
        assert!(registry.get(&key).unwrap().is_observing());
        assert!(registry.observe(&key, 0.5, ms(20)));
        assert!(!registry.observe(&key, 1.0, ms(30)));
        assert!(!registry.observe(&BlockKey::from("missing"), 1.0, ms(30)));
    }

    #[test]
    fn test_unknown_key_renders_shown() {
        let registry = BlockRegistry::new();
        assert!(registry.reveal_style(&BlockKey::from("nope"), ms(0)).is_settled());
    }

    #[test]
    fn test_is_animating() {
        let (mut registry, mut viewport) = setup();
        let spec = RevealSpec::on_mount(RevealMotion::Fade, ms(800));
        registry.mount(BlockKey::from("a"), spec, &mut viewport, ms(0));

        assert!(registry.is_animating(ms(400)));
        assert!(!registry.is_animating(ms(800)));
    }
}

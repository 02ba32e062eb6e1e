//! Page view - PortfolioContent -> ElementTree.
//!
//! The page is rebuilt from scratch whenever its shape changes (resize,
//! chat panel animation). Block keys are stable across rebuilds, so the
//! registry keeps every latched reveal.
//!
//! ```text
//! root (navy)
//! ├── hero          mount reveals: tagline 0.5 s, bio 0.8 s, resume 1.0 s
//! ├── skills        light   items: threshold 0.5, stagger 0.1 s
//! ├── projects      dark    cards: threshold 0.2, stagger 0.2 s
//! ├── certifications light  cards: stagger 0.2 s
//! ├── coding-profiles dark  stat cards: stagger 0.2 s, count-up on reveal
//! ├── blogs         light
//! ├── contact       dark    copy button
//! └── footer        dark
//! overlay: header   fades in over the first screen of scroll
//! overlay: chat     launcher + pop-in panel
//! ```

mod sections;

use std::time::Duration;

use crate::config::AnimationConfig;
use crate::content::PortfolioContent;
use crate::engine::ElementTree;
use crate::state::reveal::{RevealMotion, RevealSpec};
use crate::theme::Theme;
use crate::types::BlockKey;

pub use sections::CHAT_LAUNCHER_WIDTH;

/// Screen-dependent inputs of the page shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub width: u16,
    pub height: u16,
    /// Chat panel scale; 0 hides the panel.
    pub chat_scale: f32,
}

impl ViewState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            chat_scale: 0.0,
        }
    }
}

// =============================================================================
// Block keys
// =============================================================================

const STAT_PREFIX: &str = "stats/";

/// Key of the stat card with index `i`.
pub fn stat_key(i: usize) -> BlockKey {
    BlockKey::new(format!("{STAT_PREFIX}{i}"))
}

/// Stat index of a stat card key.
pub fn stat_index(key: &BlockKey) -> Option<usize> {
    key.as_str().strip_prefix(STAT_PREFIX)?.parse().ok()
}

// =============================================================================
// Reveal timings
// =============================================================================

/// Reveal timings shared by every section builder.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Timings {
    pub duration: Duration,
    pub offset_rows: u16,
    pub section_threshold: f32,
}

impl Timings {
    pub fn from_config(anim: &AnimationConfig) -> Self {
        Self {
            duration: anim.reveal_duration(),
            offset_rows: anim.reveal_offset_rows,
            section_threshold: anim.section_threshold,
        }
    }

    /// Whole-section slide-up.
    pub fn section(&self) -> RevealSpec {
        RevealSpec::in_view(
            self.section_threshold,
            RevealMotion::SlideUp(self.offset_rows),
            self.duration,
        )
    }

    /// Hero entrance played once on mount.
    pub fn entrance(&self, delay_ms: u64) -> RevealSpec {
        RevealSpec::on_mount(RevealMotion::SlideUp(1), self.duration)
            .with_delay(Duration::from_millis(delay_ms))
    }

    /// Staggered item of a list: `index * stagger` delay.
    pub fn item(&self, threshold: f32, motion: RevealMotion, index: usize, stagger_ms: u64) -> RevealSpec {
        RevealSpec::in_view(threshold, motion, self.duration)
            .with_delay(Duration::from_millis(stagger_ms * index as u64))
    }
}

// =============================================================================
// Build
// =============================================================================

/// Build the whole page: the scrolling root plus header and chat overlays.
pub fn build_page(content: &PortfolioContent, theme: &Theme, anim: &AnimationConfig, state: ViewState) -> ElementTree {
    let mut page = sections::PageBuilder::new(content, theme, Timings::from_config(anim), state);
    page.build();
    page.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::state::reveal::RevealTrigger;

    fn setup() -> ElementTree {
        build_page(
            &PortfolioContent::default(),
            &Theme::default(),
            &AnimationConfig::default(),
            ViewState::new(80, 24),
        )
    }

    #[test]
    fn test_stat_keys() {
        assert_eq!(stat_key(1).as_str(), "stats/1");
        assert_eq!(stat_index(&stat_key(7)), Some(7));
        assert_eq!(stat_index(&BlockKey::new("projects/1")), None);
        assert_eq!(stat_index(&BlockKey::new("stats/x")), None);
    }

    #[test]
    fn test_page_has_sections_and_overlays() {
        let tree = setup();
        let ids: Vec<&str> = tree.anchors().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["about", "skills", "projects", "certifications", "coding-profiles", "blogs", "contact"]
        );
        assert_eq!(tree.overlays().len(), 2);
        assert!(tree.root().is_some());
    }

    #[test]
    fn test_block_timings() {
        let tree = setup();
        let spec = |key: &str| {
            tree.blocks()
                .iter()
                .find(|(k, _)| k.as_str() == key)
                .map(|(_, spec)| *spec)
                .unwrap()
        };

        let tagline = spec("hero/tagline");
        assert_eq!(tagline.trigger, RevealTrigger::Mount);
        assert_eq!(tagline.delay, Duration::from_millis(500));
        assert_eq!(spec("hero/resume").delay, Duration::from_secs(1));

        assert_eq!(spec("section/skills").trigger, RevealTrigger::InView { threshold: 0.1 });
        assert_eq!(spec("skills/technical/3").delay, Duration::from_millis(300));
        assert_eq!(spec("skills/technical/3").trigger, RevealTrigger::InView { threshold: 0.5 });
        assert_eq!(spec("projects/2").delay, Duration::from_millis(400));
        assert_eq!(spec("projects/2").trigger, RevealTrigger::InView { threshold: 0.2 });
        assert_eq!(spec("stats/1").delay, Duration::from_millis(200));
    }

    #[test]
    fn test_block_keys_are_unique() {
        let tree = setup();
        let mut keys: Vec<&str> = tree.blocks().iter().map(|(k, _)| k.as_str()).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_page_lays_out_taller_than_screen() {
        let tree = setup();
        let layout = compute_layout(&tree, 80, 24);
        assert!(layout.content_height > 24 * 3);

        let hero = tree.anchors()[0].element;
        assert_eq!(layout.get(hero).1, 0);
        assert!(layout.get(hero).3 >= 24);
    }

    #[test]
    fn test_chat_panel_only_when_open() {
        let closed = setup();
        let open = build_page(
            &PortfolioContent::default(),
            &Theme::default(),
            &AnimationConfig::default(),
            ViewState {
                chat_scale: 1.0,
                ..ViewState::new(80, 24)
            },
        );
        assert!(open.len() > closed.len());
    }
}

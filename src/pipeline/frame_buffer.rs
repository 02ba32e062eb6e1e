//! Frame painting - element tree + layout + reveal state -> FrameBuffer.
//!
//! The page is painted in page coordinates into a buffer as tall as the
//! content, then the visible window `[scroll, scroll + height)` is copied
//! onto the screen. Overlays are painted afterwards straight onto the
//! screen.
//!
//! Per element:
//! - a content block applies its [`RevealStyle`]: the subtree moves down by
//!   `offset_rows` and its colors fade into the backdrop by `opacity`
//! - a scroll fade multiplies the opacity by a scroll-linked factor
//! - box backgrounds become the backdrop for everything inside them
//! - hit regions are collected as data, clipped to what is visible
//!
//! A subtree whose opacity reaches zero is skipped entirely, hit regions
//! included.

use std::time::Duration;

use crate::engine::{BlockRegistry, DynamicText, ElementKind, ElementTree, HitTarget, TextSource};
use crate::layout::{string_width, wrap_text, ComputedLayout};
use crate::renderer::FrameBuffer;
use crate::state::animate::map_range;
use crate::state::reveal::RevealStyle;
use crate::types::{ClipRect, Rgba, TextAlign};

// =============================================================================
// Types
// =============================================================================

/// A clickable screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub rect: ClipRect,
    pub target: HitTarget,
}

/// Result of painting one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBufferResult {
    pub buffer: FrameBuffer,
    /// Hit regions in paint order; later regions sit on top.
    pub hit_regions: Vec<HitRegion>,
}

impl FrameBufferResult {
    /// Topmost target under a screen position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitTarget> {
        hit_test(&self.hit_regions, x, y)
    }
}

/// Topmost target under a screen position.
pub fn hit_test(regions: &[HitRegion], x: u16, y: u16) -> Option<HitTarget> {
    regions
        .iter()
        .rev()
        .find(|region| region.rect.contains(x, y))
        .map(|region| region.target)
}

/// Supplies the current text of [`DynamicText`] leaves.
pub trait TextResolver {
    fn resolve(&self, text: DynamicText) -> String;
}

/// Everything painting reads besides the tree and its layout.
pub struct PaintContext<'a> {
    pub width: u16,
    pub height: u16,
    pub scroll: u16,
    pub now: Duration,
    /// Color behind the page root and the overlays.
    pub backdrop: Rgba,
    pub registry: &'a BlockRegistry,
    pub text: &'a dyn TextResolver,
}

/// Colors and opacity flowing from parent to child.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    fg: Rgba,
    backdrop: Rgba,
    opacity: f32,
}

// =============================================================================
// Painting
// =============================================================================

/// Paint the page window and overlays into a screen-sized buffer.
pub fn paint(tree: &ElementTree, layout: &ComputedLayout, ctx: &PaintContext<'_>) -> FrameBufferResult {
    let mut screen = FrameBuffer::new(ctx.width, ctx.height);
    let mut painter = Painter {
        tree,
        layout,
        ctx,
        hits: Vec::new(),
    };
    let root_inherited = Inherited {
        fg: Rgba::TERMINAL_DEFAULT,
        backdrop: ctx.backdrop,
        opacity: 1.0,
    };

    if ctx.width == 0 || ctx.height == 0 {
        return FrameBufferResult {
            buffer: screen,
            hit_regions: Vec::new(),
        };
    }

    screen.fill_rect(screen.bounds(), ctx.backdrop, None);

    if let Some(root) = tree.root() {
        let page_height = layout.content_height.max(ctx.height.saturating_add(ctx.scroll));
        let mut page = FrameBuffer::new(ctx.width, page_height);
        page.fill_rect(page.bounds(), ctx.backdrop, None);

        let window = ClipRect::new(0, ctx.scroll, ctx.width, ctx.height);
        painter.paint_element(&mut page, root, 0, root_inherited, window);
        blit_window(&page, &mut screen, ctx.scroll);

        painter.hits = painter
            .hits
            .iter()
            .filter_map(|hit| {
                let visible = hit.rect.intersect(&window)?;
                Some(HitRegion {
                    rect: ClipRect::new(visible.x, visible.y - ctx.scroll, visible.width, visible.height),
                    target: hit.target,
                })
            })
            .collect();
    }

    let bounds = screen.bounds();
    for &overlay in tree.overlays() {
        painter.paint_element(&mut screen, overlay, 0, root_inherited, bounds);
    }

    FrameBufferResult {
        buffer: screen,
        hit_regions: painter.hits,
    }
}

/// Copy rows `[scroll, scroll + screen.height)` of `page` onto `screen`.
fn blit_window(page: &FrameBuffer, screen: &mut FrameBuffer, scroll: u16) {
    for y in 0..screen.height() {
        for x in 0..screen.width() {
            if let Some(cell) = page.get(x, y.saturating_add(scroll)).copied() {
                screen.set_cell(x, y, cell, None);
            }
        }
    }
}

struct Painter<'a> {
    tree: &'a ElementTree,
    layout: &'a ComputedLayout,
    ctx: &'a PaintContext<'a>,
    hits: Vec<HitRegion>,
}

impl Painter<'_> {
    fn paint_element(&mut self, buffer: &mut FrameBuffer, index: usize, dy: u16, inherited: Inherited, clip: ClipRect) {
        let Some(element) = self.tree.get(index) else {
            return;
        };

        let mut dy = dy;
        let mut opacity = inherited.opacity;
        if let Some(key) = &element.block {
            let style: RevealStyle = self.ctx.registry.reveal_style(key, self.ctx.now);
            dy = dy.saturating_add(style.offset_rows);
            opacity *= style.opacity;
        }
        if let Some(fade) = element.scroll_fade {
            opacity *= map_range(
                self.ctx.scroll as f32,
                (0.0, fade.distance as f32),
                (fade.from, fade.to),
            );
        }
        if opacity <= 0.0 {
            return;
        }

        let (x, y, w, h) = self.layout.get(index);
        if w == 0 || h == 0 {
            return;
        }
        let bounds = ClipRect::new(x, y.saturating_add(dy), w, h);
        let Some(visible) = bounds.intersect(&clip) else {
            return;
        };

        if let Some(target) = element.hit {
            self.hits.push(HitRegion { rect: visible, target });
        }

        match &element.kind {
            ElementKind::Box(style) => {
                let mut inner = Inherited {
                    fg: style.fg.unwrap_or(inherited.fg),
                    backdrop: inherited.backdrop,
                    opacity,
                };

                if let Some(bg) = style.bg {
                    let painted = bg.fade(inherited.backdrop, opacity);
                    buffer.fill_rect(bounds, painted, Some(&visible));
                    inner.backdrop = painted;
                }

                if style.has_border() {
                    let color = style.border_color.unwrap_or(inner.fg).fade(inner.backdrop, opacity);
                    buffer.draw_border(bounds, style.border, color, Some(&visible));
                }

                // Children clip to the window, not the box, so a block sliding
                // in below its parent stays visible
                for &child in &element.children {
                    self.paint_element(buffer, child, dy, inner, clip);
                }
            }
            ElementKind::Text(source, style) => {
                let fg = style
                    .fg
                    .unwrap_or(inherited.fg)
                    .fade(inherited.backdrop, opacity);
                let lines = match source {
                    TextSource::Static(text) => wrap_text(text, w),
                    TextSource::Dynamic { text, .. } => vec![self.ctx.text.resolve(*text)],
                };

                for (row, line) in lines.iter().enumerate().take(h as usize) {
                    let indent = match style.align {
                        TextAlign::Left => 0,
                        TextAlign::Center => w.saturating_sub(string_width(line)) / 2,
                    };
                    buffer.draw_text(
                        bounds.x + indent,
                        bounds.y + row as u16,
                        line,
                        fg,
                        None,
                        style.attrs,
                        Some(&visible),
                    );
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BoxStyle, Edges, TextStyle};
    use crate::layout::compute_layout;
    use crate::state::reveal::{RevealMotion, RevealSpec};
    use crate::state::scroll::{Region, Viewport};
    use crate::types::BlockKey;

    const NAVY: Rgba = Rgba::from_rgb_int(0x172554);
    const WHITE: Rgba = Rgba::from_rgb_int(0xffffff);

    struct Labels;

    impl TextResolver for Labels {
        fn resolve(&self, text: DynamicText) -> String {
            match text {
                DynamicText::Counter(i) => format!("{}", (i + 1) * 100),
                DynamicText::CopyLabel => "Copy Email".to_string(),
                DynamicText::ChatLauncher => "chat".to_string(),
            }
        }
    }

    fn ctx<'a>(registry: &'a BlockRegistry, scroll: u16, now: Duration) -> PaintContext<'a> {
        PaintContext {
            width: 20,
            height: 4,
            scroll,
            now,
            backdrop: NAVY,
            registry,
            text: &Labels,
        }
    }

    /// Ten one-line rows "row 0".."row 9".
    fn setup() -> ElementTree {
        let mut tree = ElementTree::new();
        tree.open(BoxStyle {
            bg: Some(NAVY),
            fg: Some(WHITE),
            ..BoxStyle::column()
        });
        for i in 0..10 {
            tree.text(format!("row {i}"), TextStyle::default());
        }
        tree.close();
        tree
    }

    #[test]
    fn test_paints_visible_window() {
        let tree = setup();
        let layout = compute_layout(&tree, 20, 4);
        let registry = BlockRegistry::new();

        let frame = paint(&tree, &layout, &ctx(&registry, 3, Duration::ZERO));
        assert_eq!(frame.buffer.to_text(), "row 3\nrow 4\nrow 5\nrow 6");
        assert_eq!(frame.buffer.get(0, 0).unwrap().fg, WHITE);
        assert_eq!(frame.buffer.get(0, 0).unwrap().bg, NAVY);
    }

    #[test]
    fn test_hidden_block_is_not_painted() {
        let mut tree = ElementTree::new();
        tree.open(BoxStyle::column());
        let card = tree.open(BoxStyle::column());
        tree.text("secret", TextStyle::default());
        tree.close();
        tree.close();
        let key = BlockKey::new("card");
        tree.reveal(card, key.clone(), RevealSpec::in_view(0.5, RevealMotion::SlideUp(2), Duration::from_millis(800)));

        let layout = compute_layout(&tree, 20, 4);
        let mut viewport = Viewport::new(4);
        let mut registry = BlockRegistry::new();
        registry.sync(tree.blocks(), &mut viewport, Duration::ZERO);

        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::ZERO));
        assert!(!frame.buffer.to_text().contains("secret"));

        viewport.set_region(key.clone(), Region::new(0, 1));
        registry.deliver(&viewport.notify(), Duration::ZERO);

        // Mid-transition the block is shifted down
        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::from_millis(10)));
        assert_eq!(frame.buffer.row_text(0), "");
        assert!(frame.buffer.to_text().contains("secret"));

        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::from_secs(1)));
        assert_eq!(frame.buffer.row_text(0), "secret");
    }

    #[test]
    fn test_hit_regions_follow_scroll() {
        let mut tree = ElementTree::new();
        tree.open(BoxStyle::column());
        for i in 0..6 {
            tree.text(format!("line {i}"), TextStyle::default());
        }
        let button = tree.dynamic_text(DynamicText::CopyLabel, 10, TextStyle::default());
        tree.hit(button, HitTarget::CopyEmail);
        tree.close();

        let layout = compute_layout(&tree, 20, 4);
        let registry = BlockRegistry::new();

        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::ZERO));
        assert!(frame.hit_regions.is_empty());

        let frame = paint(&tree, &layout, &ctx(&registry, 3, Duration::ZERO));
        assert_eq!(frame.buffer.row_text(3), "Copy Email");
        assert_eq!(frame.hit_test(2, 3), Some(HitTarget::CopyEmail));
        assert_eq!(frame.hit_test(2, 2), None);
    }

    #[test]
    fn test_overlay_painted_on_top() {
        let mut tree = setup();
        tree.open_overlay(BoxStyle::column());
        let badge = tree.open(BoxStyle {
            bg: Some(WHITE),
            padding: Edges::symmetric(0, 1),
            ..BoxStyle::row()
        });
        tree.text("hey", TextStyle::fg(NAVY));
        tree.close();
        tree.hit(badge, HitTarget::ToggleChat);
        tree.close();

        let layout = compute_layout(&tree, 20, 4);
        let registry = BlockRegistry::new();
        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::ZERO));

        assert!(frame.buffer.row_text(0).starts_with(" hey"));
        assert_eq!(frame.buffer.get(1, 0).unwrap().bg, WHITE);
        assert_eq!(frame.hit_test(0, 0), Some(HitTarget::ToggleChat));
    }

    #[test]
    fn test_scroll_fade_hides_at_zero_opacity() {
        let mut tree = setup();
        tree.open_overlay(BoxStyle::column());
        let header = tree.text("HEADER", TextStyle::default());
        tree.scroll_fade(header, crate::engine::ScrollFade { distance: 5, from: 0.0, to: 1.0 });
        tree.close();

        let layout = compute_layout(&tree, 20, 4);
        let registry = BlockRegistry::new();

        let top = paint(&tree, &layout, &ctx(&registry, 0, Duration::ZERO));
        assert_eq!(top.buffer.row_text(0), "row 0");

        let scrolled = paint(&tree, &layout, &ctx(&registry, 5, Duration::ZERO));
        assert_eq!(scrolled.buffer.row_text(0), "HEADER");
    }

    #[test]
    fn test_centered_text() {
        let mut tree = ElementTree::new();
        tree.open(BoxStyle::column());
        tree.text("hi", TextStyle::default().centered());
        tree.close();

        let layout = compute_layout(&tree, 20, 4);
        let registry = BlockRegistry::new();
        let frame = paint(&tree, &layout, &ctx(&registry, 0, Duration::ZERO));
        assert_eq!(frame.buffer.row_text(0), "         hi");
    }
}

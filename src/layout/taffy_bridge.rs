//! Taffy Bridge - Integration with Taffy layout engine
//!
//! Converts element styles to Taffy styles, runs layout computation with a
//! text measure function, and extracts absolute rects into ComputedLayout.
//!
//! The page root is laid out at the terminal width with unbounded height
//! (the page scrolls). Overlay roots are laid out at the full terminal size.

use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, FlexWrap, JustifyContent as TaffyJustifyContent,
    LengthPercentage, LengthPercentageAuto, NodeId, Rect, Size, Style, TaffyError, TaffyTree,
};
use tracing::warn;

use crate::engine::{Edges, Element, ElementKind, ElementTree, TextSource};
use crate::types::{AlignItems, Dimension, FlexDirection, JustifyContent};

use super::text_measure::{min_content_width, string_width, wrap_text};
use super::types::ComputedLayout;

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Cells(n) => TaffyDimension::Length(n as f32),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

fn to_taffy_padding(edges: Edges) -> Rect<LengthPercentage> {
    Rect {
        top: LengthPercentage::Length(edges.top as f32),
        right: LengthPercentage::Length(edges.right as f32),
        bottom: LengthPercentage::Length(edges.bottom as f32),
        left: LengthPercentage::Length(edges.left as f32),
    }
}

fn to_taffy_margin(edges: Edges) -> Rect<LengthPercentageAuto> {
    Rect {
        top: LengthPercentageAuto::Length(edges.top as f32),
        right: LengthPercentageAuto::Length(edges.right as f32),
        bottom: LengthPercentageAuto::Length(edges.bottom as f32),
        left: LengthPercentageAuto::Length(edges.left as f32),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
    })
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from an element.
fn build_style(element: &Element) -> Style {
    let ElementKind::Box(node) = &element.kind else {
        // Text uses the measure function for intrinsic size
        return Style::default();
    };

    let border = if node.has_border() { 1.0 } else { 0.0 };
    // Wrapped rows get one blank row between lines
    let cross_gap = match node.direction {
        FlexDirection::Row if node.gap > 0 => 1,
        FlexDirection::Row => 0,
        FlexDirection::Column => node.gap,
    };
    let main_gap = match node.direction {
        FlexDirection::Row => node.gap,
        FlexDirection::Column => 0,
    };

    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(node.direction),
        flex_wrap: if node.wrap { FlexWrap::Wrap } else { FlexWrap::NoWrap },
        justify_content: to_taffy_justify_content(node.justify),
        align_items: to_taffy_align_items(node.align_items),
        flex_grow: node.grow,
        size: Size {
            width: to_taffy_dimension(node.width),
            height: TaffyDimension::Auto,
        },
        min_size: Size {
            width: TaffyDimension::Auto,
            height: to_taffy_dimension(node.min_height),
        },
        max_size: Size {
            width: node
                .max_width
                .map(|w| TaffyDimension::Length(w as f32))
                .unwrap_or(TaffyDimension::Auto),
            height: TaffyDimension::Auto,
        },
        margin: to_taffy_margin(node.margin),
        padding: to_taffy_padding(node.padding),
        border: Rect {
            top: LengthPercentage::Length(border),
            right: LengthPercentage::Length(border),
            bottom: LengthPercentage::Length(border),
            left: LengthPercentage::Length(border),
        },
        gap: Size {
            width: LengthPercentage::Length(main_gap as f32),
            height: LengthPercentage::Length(cross_gap as f32),
        },
        ..Default::default()
    }
}

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Measure function for text content.
fn measure_text(
    element: &Element,
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
) -> Size<f32> {
    let ElementKind::Text(source, _) = &element.kind else {
        return Size::ZERO;
    };

    let (width, height) = match source {
        TextSource::Dynamic { width, .. } => (*width, 1),
        TextSource::Static(content) => {
            if content.is_empty() {
                return Size::ZERO;
            }

            let wrap_width = match known_dimensions.width {
                Some(w) => w as u16,
                None => match available_space.width {
                    AvailableSpace::Definite(w) => w as u16,
                    AvailableSpace::MinContent => min_content_width(content),
                    AvailableSpace::MaxContent => u16::MAX,
                },
            };

            let lines = wrap_text(content, wrap_width.max(1));
            let width = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
            (width, lines.len() as u16)
        }
    };

    Size {
        width: known_dimensions.width.unwrap_or(width as f32),
        height: known_dimensions.height.unwrap_or(height as f32),
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute layout for every element of the tree.
///
/// # Arguments
///
/// * `terminal_width` - Available width in terminal columns
/// * `terminal_height` - Terminal rows (sizes the overlay roots)
pub fn compute_layout(tree: &ElementTree, terminal_width: u16, terminal_height: u16) -> ComputedLayout {
    match compute_layout_taffy(tree, terminal_width, terminal_height) {
        Ok(layout) => layout,
        Err(error) => {
            warn!(%error, "layout failed");
            ComputedLayout::with_len(tree.len())
        }
    }
}

fn compute_layout_taffy(
    tree: &ElementTree,
    terminal_width: u16,
    terminal_height: u16,
) -> Result<ComputedLayout, TaffyError> {
    let mut result = ComputedLayout::with_len(tree.len());
    if tree.is_empty() {
        return Ok(result);
    }

    let page_root = tree.root();
    let screen = Size {
        width: TaffyDimension::Length(terminal_width as f32),
        height: TaffyDimension::Length(terminal_height as f32),
    };

    let mut taffy: TaffyTree<usize> = TaffyTree::new();

    // First pass: one node per element, in index order
    let mut nodes: Vec<NodeId> = Vec::with_capacity(tree.len());
    for (idx, element) in tree.elements().iter().enumerate() {
        let mut style = build_style(element);
        if Some(idx) == page_root {
            style.size.width = screen.width;
        } else if tree.overlays().contains(&idx) {
            style.size = screen;
        }

        let node = if element.is_text() {
            taffy.new_leaf_with_context(style, idx)?
        } else {
            taffy.new_leaf(style)?
        };
        nodes.push(node);
    }

    // Second pass: parent-child relationships
    for (idx, element) in tree.elements().iter().enumerate() {
        if element.children.is_empty() {
            continue;
        }
        let children: Vec<NodeId> = element.children.iter().map(|&c| nodes[c]).collect();
        taffy.set_children(nodes[idx], &children)?;
    }

    let mut measure_fn = |known_dimensions: Size<Option<f32>>,
                          available_space: Size<AvailableSpace>,
                          _node_id: NodeId,
                          context: Option<&mut usize>,
                          _style: &Style| {
        match context.and_then(|idx| tree.get(*idx)) {
            Some(element) => measure_text(element, known_dimensions, available_space),
            None => Size::ZERO,
        }
    };

    let mut roots: Vec<usize> = Vec::new();
    if let Some(root) = page_root {
        let available = Size {
            width: AvailableSpace::Definite(terminal_width as f32),
            height: AvailableSpace::MaxContent,
        };
        taffy.compute_layout_with_measure(nodes[root], available, &mut measure_fn)?;
        roots.push(root);
    }
    for &overlay in tree.overlays() {
        let available = Size {
            width: AvailableSpace::Definite(terminal_width as f32),
            height: AvailableSpace::Definite(terminal_height as f32),
        };
        taffy.compute_layout_with_measure(nodes[overlay], available, &mut measure_fn)?;
        roots.push(overlay);
    }

    // Extract results, converting parent-relative locations to absolute
    let mut stack: Vec<(usize, f32, f32)> = roots.iter().map(|&r| (r, 0.0, 0.0)).collect();
    while let Some((idx, parent_x, parent_y)) = stack.pop() {
        let layout = taffy.layout(nodes[idx])?;
        let x = parent_x + layout.location.x;
        let y = parent_y + layout.location.y;

        result.x[idx] = x.round() as u16;
        result.y[idx] = y.round() as u16;
        result.width[idx] = layout.size.width.round() as u16;
        result.height[idx] = layout.size.height.round() as u16;

        if let Some(element) = tree.get(idx) {
            stack.extend(element.children.iter().map(|&c| (c, x, y)));
        }
    }

    if let Some(root) = page_root {
        result.content_height = result.height[root];
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BoxStyle, DynamicText, TextStyle};

    fn setup() -> ElementTree {
        ElementTree::new()
    }

    #[test]
    fn test_compute_layout_empty() {
        let tree = setup();
        let layout = compute_layout(&tree, 80, 24);
        assert!(layout.is_empty());
        assert_eq!(layout.content_height, 0);
    }

    #[test]
    fn test_root_spans_terminal_width() {
        let mut tree = setup();
        let root = tree.open(BoxStyle::column());
        let a = tree.text("first", TextStyle::default());
        let b = tree.text("second", TextStyle::default());
        tree.close();

        let layout = compute_layout(&tree, 80, 24);

        assert_eq!(layout.get(root), (0, 0, 80, 2));
        assert_eq!(layout.get(a), (0, 0, 80, 1));
        assert_eq!(layout.y[b], 1);
        assert_eq!(layout.content_height, 2);
    }

    #[test]
    fn test_text_wraps_to_width() {
        let mut tree = setup();
        tree.open(BoxStyle::column());
        let text = tree.text("hello big world", TextStyle::default());
        tree.close();

        let layout = compute_layout(&tree, 9, 24);
        assert_eq!(layout.height[text], 2);
        assert_eq!(layout.content_height, 2);
    }

    #[test]
    fn test_padding_offsets_children_absolutely() {
        let mut tree = setup();
        tree.open(BoxStyle {
            padding: Edges::symmetric(1, 2),
            ..BoxStyle::column()
        });
        tree.open(BoxStyle {
            padding: Edges::all(1),
            ..BoxStyle::column()
        });
        let leaf = tree.text("x", TextStyle::default());
        tree.close();
        tree.close();

        let layout = compute_layout(&tree, 40, 24);
        assert_eq!(layout.x[leaf], 3);
        assert_eq!(layout.y[leaf], 2);
        assert_eq!(layout.content_height, 5);
    }

    #[test]
    fn test_row_gap() {
        let mut tree = setup();
        tree.open(BoxStyle::column());
        tree.open(BoxStyle {
            gap: 2,
            ..BoxStyle::row()
        });
        let a = tree.text("abc", TextStyle::default());
        let b = tree.text("de", TextStyle::default());
        tree.close();
        tree.close();

        let layout = compute_layout(&tree, 40, 24);
        assert_eq!(layout.x[a], 0);
        assert_eq!(layout.width[a], 3);
        assert_eq!(layout.x[b], 5);
    }

    #[test]
    fn test_dynamic_text_reserves_width() {
        let mut tree = setup();
        tree.open(BoxStyle::row());
        let counter = tree.dynamic_text(DynamicText::Counter(0), 7, TextStyle::default());
        tree.close();

        let layout = compute_layout(&tree, 40, 24);
        assert_eq!(layout.width[counter], 7);
        assert_eq!(layout.height[counter], 1);
    }

    #[test]
    fn test_overlay_fills_screen() {
        let mut tree = setup();
        tree.open(BoxStyle::column());
        tree.text("page", TextStyle::default());
        tree.open_overlay(BoxStyle {
            justify: JustifyContent::FlexEnd,
            align_items: AlignItems::FlexEnd,
            ..BoxStyle::column()
        });
        let badge = tree.text("chat", TextStyle::default());
        tree.close();
        tree.close();

        let layout = compute_layout(&tree, 40, 10);
        let overlay = tree.overlays()[0];
        assert_eq!(layout.get(overlay), (0, 0, 40, 10));
        assert_eq!(layout.get(badge), (36, 9, 4, 1));
        // Overlays do not add to the page height
        assert_eq!(layout.content_height, 1);
    }

    #[test]
    fn test_dimension_conversion() {
        assert!(matches!(to_taffy_dimension(Dimension::Auto), TaffyDimension::Auto));
        assert!(matches!(to_taffy_dimension(Dimension::Cells(50)), TaffyDimension::Length(50.0)));
        if let TaffyDimension::Percent(p) = to_taffy_dimension(Dimension::Percent(50.0)) {
            assert!((p - 0.5).abs() < 0.001);
        } else {
            panic!("Expected Percent variant");
        }
    }
}

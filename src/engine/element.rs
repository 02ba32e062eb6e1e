//! Element - Node kinds and style properties.

use crate::types::{
    AlignItems, Attr, BlockKey, BorderStyle, Dimension, FlexDirection, JustifyContent, Rgba,
    TextAlign,
};

// =============================================================================
// Spacing
// =============================================================================

/// Per-side spacing in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Edges {
    pub const ZERO: Self = Self::all(0);

    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    /// Vertical `v`, horizontal `h` (CSS two-value shorthand).
    pub const fn symmetric(v: u16, h: u16) -> Self {
        Self {
            top: v,
            right: h,
            bottom: v,
            left: h,
        }
    }
}

// =============================================================================
// Box Style
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxStyle {
    pub direction: FlexDirection,
    pub wrap: bool,
    pub justify: JustifyContent,
    pub align_items: AlignItems,
    pub padding: Edges,
    pub margin: Edges,
    pub gap: u16,
    pub width: Dimension,
    pub min_height: Dimension,
    pub max_width: Option<u16>,
    /// Share of leftover main-axis space.
    pub grow: f32,
    pub bg: Option<Rgba>,
    /// Default text color for descendants.
    pub fg: Option<Rgba>,
    pub border: BorderStyle,
    pub border_color: Option<Rgba>,
}

impl BoxStyle {
    pub fn column() -> Self {
        Self::default()
    }

    pub fn row() -> Self {
        Self {
            direction: FlexDirection::Row,
            align_items: AlignItems::FlexStart,
            ..Self::default()
        }
    }

    pub fn has_border(&self) -> bool {
        self.border != BorderStyle::None
    }
}

// =============================================================================
// Text
// =============================================================================

/// Text whose content is only known at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicText {
    /// Current value of the stat counter with this index.
    Counter(usize),
    /// "Copy Email" / "Copied!".
    CopyLabel,
    /// Chat launcher face; follows the breathing pulse.
    ChatLauncher,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Static(String),
    /// Single-line dynamic text; layout reserves `width` cells.
    Dynamic { text: DynamicText, width: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextStyle {
    /// `None` inherits from the nearest box with `fg`.
    pub fg: Option<Rgba>,
    pub attrs: Attr,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn fg(color: Rgba) -> Self {
        Self {
            fg: Some(color),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.attrs |= Attr::BOLD;
        self
    }

    pub fn italic(mut self) -> Self {
        self.attrs |= Attr::ITALIC;
        self
    }

    pub fn underline(mut self) -> Self {
        self.attrs |= Attr::UNDERLINE;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }
}

// =============================================================================
// Interaction & Scroll Linking
// =============================================================================

/// What a click on an element does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    CopyEmail,
    ToggleChat,
    /// Scroll to the section anchor with this index.
    Jump(usize),
}

/// Opacity tied to the scroll offset rather than time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFade {
    /// Offset (rows) over which opacity moves from `from` to `to`.
    pub distance: u16,
    pub from: f32,
    pub to: f32,
}

// =============================================================================
// Element
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Box(BoxStyle),
    Text(TextSource, TextStyle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Content block driving this subtree's reveal.
    pub block: Option<BlockKey>,
    pub hit: Option<HitTarget>,
    pub scroll_fade: Option<ScrollFade>,
}

impl Element {
    pub fn new(kind: ElementKind, parent: Option<usize>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            block: None,
            hit: None,
            scroll_fade: None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ElementKind::Text(..))
    }
}

//! Layout Types
//!
//! Output types for the layout computation.

/// Computed layout result.
///
/// Parallel arrays indexed by element index. Positions are absolute: page
/// elements in page coordinates (row 0 = top of the page), overlay elements
/// in screen coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedLayout {
    pub x: Vec<u16>,
    pub y: Vec<u16>,
    pub width: Vec<u16>,
    pub height: Vec<u16>,

    /// Total page height (height of the page root).
    pub content_height: u16,
}

impl ComputedLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sized for `len` elements, all zero.
    pub fn with_len(len: usize) -> Self {
        Self {
            x: vec![0; len],
            y: vec![0; len],
            width: vec![0; len],
            height: vec![0; len],
            content_height: 0,
        }
    }

    /// Get the position and size of an element.
    ///
    /// Returns (x, y, width, height) or zeros if index is out of bounds.
    pub fn get(&self, index: usize) -> (u16, u16, u16, u16) {
        (
            self.x.get(index).copied().unwrap_or(0),
            self.y.get(index).copied().unwrap_or(0),
            self.width.get(index).copied().unwrap_or(0),
            self.height.get(index).copied().unwrap_or(0),
        )
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

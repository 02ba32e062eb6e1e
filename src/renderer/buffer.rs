//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. All drawing operations work on this buffer.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing
//! - **Clipping**: drawing functions accept an optional `ClipRect`
//! - **Wide characters**: emoji and CJK occupy a leading cell plus a
//!   [`CONTINUATION`] cell

use crate::layout::char_width;
use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba, CONTINUATION};

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.in_bounds(x, y).then(|| &self.cells[self.index(x, y)])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width as usize * height as usize, Cell::default());
    }

    /// Plain text of one row (continuation cells skipped, trailing spaces trimmed).
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = self.index(0, y);
        let row = &self.cells[start..start + self.width as usize];
        let text: String = row
            .iter()
            .filter(|c| c.char != CONTINUATION)
            .filter_map(|c| char::from_u32(c.char))
            .collect();
        text.trim_end().to_string()
    }

    /// Plain text of the whole buffer, one line per row.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(&mut self, x: u16, y: u16, cell: Cell, clip: Option<&ClipRect>) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if clip.is_some_and(|c| !c.contains(x, y)) {
            return false;
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        true
    }

    /// Fill a rectangle with a background color, blanking its characters.
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba, clip: Option<&ClipRect>) {
        let rect = match clip {
            Some(clip) => match rect.intersect(clip) {
                Some(r) => r,
                None => return,
            },
            None => rect,
        };
        let Some(rect) = rect.intersect(&self.bounds()) else {
            return;
        };

        for row in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, row);
            let end = start + rect.width as usize;
            for cell in &mut self.cells[start..end] {
                *cell = Cell {
                    char: b' ' as u32,
                    fg: Rgba::TERMINAL_DEFAULT,
                    bg,
                    attrs: Attr::NONE,
                };
            }
        }
    }

    /// Draw text at a position.
    ///
    /// `bg: None` keeps the background already in the buffer. Returns the
    /// number of columns advanced (wide characters count 2).
    #[allow(clippy::too_many_arguments)]
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let width = char_width(ch);
            if width == 0 {
                continue;
            }

            let visible = |c: u16| clip.is_none_or(|r| r.contains(c, y)) && c < self.width;
            // A wide char cut by the edge becomes a blank
            let (glyph, fits) = if width == 2 && !visible(col + 1) {
                (' ', false)
            } else {
                (ch, true)
            };

            if let Some(existing) = self.get(col, y).copied() {
                let cell = Cell {
                    char: glyph as u32,
                    fg,
                    bg: bg.unwrap_or(existing.bg),
                    attrs,
                };
                if self.set_cell(col, y, cell, clip) && width == 2 && fits {
                    self.set_cell(col + 1, y, Cell { char: CONTINUATION, ..cell }, clip);
                }
            }

            col = col.saturating_add(width);
        }

        col.saturating_sub(x)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(&mut self, rect: ClipRect, style: BorderStyle, color: Rgba, clip: Option<&ClipRect>) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;

        let put = |buf: &mut Self, x: u16, y: u16, c: char| {
            if let Some(existing) = buf.get(x, y).copied() {
                let cell = Cell {
                    char: c as u32,
                    fg: color,
                    bg: existing.bg,
                    attrs: Attr::NONE,
                };
                buf.set_cell(x, y, cell, clip);
            }
        };

        put(self, rect.x, rect.y, tl);
        put(self, x2, rect.y, tr);
        put(self, x2, y2, br);
        put(self, rect.x, y2, bl);

        for col in (rect.x + 1)..x2 {
            put(self, col, rect.y, horiz);
            put(self, col, y2, horiz);
        }
        for row in (rect.y + 1)..y2 {
            put(self, rect.x, row, vert);
            put(self, x2, row, vert);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const NAVY: Rgba = Rgba::from_rgb_int(0x172554);
    const YELLOW: Rgba = Rgba::from_rgb_int(0xfacc15);

    #[test]
    fn test_new_is_blank() {
        let buf = FrameBuffer::new(4, 2);
        assert_eq!(buf.cells().len(), 8);
        assert_eq!(buf.to_text(), "\n");
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn test_fill_rect_clipped() {
        let mut buf = FrameBuffer::new(10, 5);
        let clip = ClipRect::new(0, 0, 10, 2);
        buf.fill_rect(ClipRect::new(2, 1, 3, 3), NAVY, Some(&clip));

        assert_eq!(buf.get(2, 1).unwrap().bg, NAVY);
        assert_eq!(buf.get(4, 1).unwrap().bg, NAVY);
        assert_eq!(buf.get(2, 2).unwrap().bg, Rgba::TERMINAL_DEFAULT);
        assert_eq!(buf.get(5, 1).unwrap().bg, Rgba::TERMINAL_DEFAULT);
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buf = FrameBuffer::new(10, 1);
        buf.fill_rect(buf.bounds(), NAVY, None);
        let cols = buf.draw_text(1, 0, "Hi", YELLOW, None, Attr::BOLD, None);

        assert_eq!(cols, 2);
        assert_eq!(buf.row_text(0), " Hi");
        let cell = buf.get(1, 0).unwrap();
        assert_eq!(cell.fg, YELLOW);
        assert_eq!(cell.bg, NAVY);
        assert_eq!(cell.attrs, Attr::BOLD);
    }

    #[test]
    fn test_draw_wide_char() {
        let mut buf = FrameBuffer::new(6, 1);
        let cols = buf.draw_text(0, 0, "☕a", YELLOW, None, Attr::NONE, None);

        assert_eq!(cols, 3);
        assert_eq!(buf.get(0, 0).unwrap().char, '☕' as u32);
        assert_eq!(buf.get(1, 0).unwrap().char, CONTINUATION);
        assert_eq!(buf.get(2, 0).unwrap().char, 'a' as u32);
        assert_eq!(buf.row_text(0), "☕a");
    }

    #[test]
    fn test_wide_char_at_edge_becomes_blank() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_text(2, 0, "☕", YELLOW, None, Attr::NONE, None);
        assert_eq!(buf.get(2, 0).unwrap().char, ' ' as u32);
    }

    #[test]
    fn test_draw_text_clipped() {
        let mut buf = FrameBuffer::new(10, 1);
        let clip = ClipRect::new(0, 0, 3, 1);
        buf.draw_text(0, 0, "hello", YELLOW, None, Attr::NONE, Some(&clip));
        assert_eq!(buf.row_text(0), "hel");
    }

    #[test]
    fn test_draw_border() {
        let mut buf = FrameBuffer::new(5, 3);
        buf.draw_border(ClipRect::new(0, 0, 5, 3), BorderStyle::Rounded, YELLOW, None);
        assert_eq!(buf.to_text(), "╭───╮\n│   │\n╰───╯");
    }

    #[test]
    fn test_resize_clears() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_text(0, 0, "abc", YELLOW, None, Attr::NONE, None);
        buf.resize(2, 2);
        assert_eq!(buf.cells().len(), 4);
        assert_eq!(buf.to_text(), "\n");
    }
}

//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized block (begin_sync/end_sync)
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: render cell with StatefulCellRenderer
//! 3. Write the output buffer in one go
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for fullscreen mode.
#[derive(Debug, Default)]
pub struct DiffRenderer {
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame to `out`, writing only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render<W: Write>(&mut self, buffer: &FrameBuffer, out: &mut W) -> io::Result<usize> {
        let previous = self
            .previous
            .take()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        self.cell_renderer.reset();

        let mut changed = 0;
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };
                if previous.as_ref().and_then(|p| p.get(x, y)) == Some(cell) {
                    continue;
                }
                changed += 1;
                self.cell_renderer.render_cell(&mut self.output, x, y, cell);
            }
        }

        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(out)?;

        self.previous = Some(buffer.clone());
        Ok(changed)
    }

    /// Forget the previous frame; the next render redraws everything.
    ///
    /// Use after a resize or anything else that dirtied the screen.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter the alternate screen with a hidden cursor.
    pub fn enter_fullscreen<W: Write>(&mut self, out: &mut W, title: &str) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::set_title(&mut self.output, title)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.output.flush_to(out)?;
        self.invalidate();
        Ok(())
    }

    /// Leave the alternate screen and restore the cursor.
    pub fn exit_fullscreen<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_to(out)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    fn frame(text: &str) -> FrameBuffer {
        let mut buf = FrameBuffer::new(8, 2);
        buf.draw_text(0, 0, text, Rgba::WHITE, Some(Rgba::BLACK), Attr::NONE, None);
        buf
    }

    #[test]
    fn test_first_frame_writes_everything() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();

        let changed = renderer.render(&frame("hi"), &mut out).unwrap();
        assert_eq!(changed, 16);
        assert!(renderer.has_previous());

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\x1b[?2026h"));
        assert!(text.ends_with("\x1b[?2026l"));
        assert!(text.contains("hi"));
    }

    #[test]
    fn test_second_frame_writes_only_changes() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("hi"), &mut out).unwrap();

        out.clear();
        let changed = renderer.render(&frame("ho"), &mut out).unwrap();
        assert_eq!(changed, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[1;2H"));
        assert!(text.contains('o'));
        assert!(!text.contains('i'));
    }

    #[test]
    fn test_unchanged_frame_writes_no_cells() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("same"), &mut out).unwrap();
        assert_eq!(renderer.render(&frame("same"), &mut out).unwrap(), 0);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("x"), &mut out).unwrap();

        let bigger = FrameBuffer::new(10, 2);
        assert_eq!(renderer.render(&bigger, &mut out).unwrap(), 20);
    }

    #[test]
    fn test_invalidate() {
        let mut renderer = DiffRenderer::new();
        let mut out = Vec::new();
        renderer.render(&frame("x"), &mut out).unwrap();

        renderer.invalidate();
        assert!(!renderer.has_previous());
        assert_eq!(renderer.render(&frame("x"), &mut out).unwrap(), 16);
    }
}

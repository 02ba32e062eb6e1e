//! Rendering Pipeline
//!
//! Connects the element tree to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! ElementTree → compute_layout → paint (reveal styles, scroll window) → DiffRenderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **layout** - Taffy computes absolute rects for the page and overlays
//! 2. **frame_buffer** - Paints the visible window of the page plus overlays
//!    into a screen-sized [`FrameBuffer`](crate::renderer::FrameBuffer)
//! 3. **mount** - Owns the terminal, polls input, and hands frames to the
//!    diff renderer
//!
//! Painting is a pure function of tree, layout, scroll offset and time;
//! only [`mount`] touches terminal I/O.

pub mod frame_buffer;
pub mod mount;
pub mod terminal;

// Re-exports
pub use frame_buffer::{hit_test, paint, FrameBufferResult, HitRegion, PaintContext, TextResolver};
pub use mount::{mount, run, tick, MountHandle};
pub use terminal::{
    detect_terminal_size, set_terminal_size, terminal_height, terminal_size, terminal_width,
};

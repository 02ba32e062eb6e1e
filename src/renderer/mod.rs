//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It doesn't understand elements,
//! layout, or reveals. It takes a filled FrameBuffer and writes optimized
//! ANSI escape sequences, diffing against the previous frame on the
//! alternate screen.

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;

pub use buffer::FrameBuffer;
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};

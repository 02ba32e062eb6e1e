//! Layout Module
//!
//! Flexbox layout computation for the page using Taffy.
//!
//! # Architecture
//!
//! The layout module uses [Taffy](https://github.com/DioxusLabs/taffy) for
//! W3C-compliant flexbox computation. The bridge:
//!
//! 1. Converts element box styles → Taffy styles
//! 2. Builds the Taffy tree from the element arena's child lists
//! 3. Provides a measure function for text intrinsic sizing (word wrap)
//! 4. Extracts absolute rects back into parallel arrays
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::layout::compute_layout;
//!
//! let layout = compute_layout(&tree, 80, 24);
//! viewport.set_content_height(layout.content_height);
//! ```

mod taffy_bridge;
mod text_measure;
mod types;

pub use taffy_bridge::compute_layout;
pub use text_measure::*;
pub use types::*;

//! Page Engine - Element tree and content block registry.
//!
//! The engine manages the core data structures:
//! - Element: what a node is (box or text) and how it is styled
//! - ElementTree: index-based arena with a parent context stack for building
//! - Registry: ContentBlock lifecycle (reveal latch + visibility subscription)
//!
//! # Architecture
//!
//! Elements are indices into one arena rather than boxed objects:
//!
//! ```text
//! Index 0: Box  (parent=None, column, bg=navy)
//! Index 1: Box  (parent=0,    row, wrap, block="skills/0")
//! Index 2: Text (parent=1,    "Rust", fg=yellow)
//! ```
//!
//! Layout and painting walk the same indices, so per-element results are
//! plain vectors.

mod element;
mod registry;
mod tree;

pub use element::*;
pub use registry::*;
pub use tree::*;

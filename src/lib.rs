//! # folio-tui
//!
//! A personal portfolio rendered in the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! the reactive widget state (scroll offset, counters, copy flag, chat).
//!
//! ## Architecture
//!
//! The page is an index-based element arena. Content blocks inside it carry
//! a one-shot reveal latch that closes the first time enough of the block
//! scrolls into view; stat cards start a count-up when they reveal.
//!
//! ```text
//! PortfolioContent → view::build_page → ElementTree → compute_layout
//!                                            │
//!                     Viewport regions ──► BlockRegistry (reveal latches)
//!                                            │
//!                            paint → FrameBuffer → DiffRenderer
//! ```
//!
//! All animation runs on a single-threaded cooperative [`Scheduler`] driven
//! by the event loop, so tests replay whole timelines with virtual time.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Rgba, Attr, Cell, BlockKey, layout enums)
//! - [`state`] - Scheduler, reveal latch, count-up, scroll, clipboard, chat, input
//! - [`engine`] - Element tree and content block registry
//! - [`layout`] - Taffy flexbox bridge and text measurement
//! - [`renderer`] - Frame buffer and ANSI diff renderer
//! - [`pipeline`] - Painting, terminal size, mount and event loop
//! - [`content`], [`theme`], [`view`] - What the page shows and how it looks
//! - [`app`] - One viewing session tying it all together

pub mod app;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod format;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::*;

pub use app::App;
pub use config::AppConfig;
pub use content::PortfolioContent;
pub use error::{FolioError, Result};

pub use engine::{BlockRegistry, ContentBlock, ElementTree};

pub use layout::{compute_layout, string_width, wrap_text, ComputedLayout};

pub use renderer::{DiffRenderer, FrameBuffer};

pub use pipeline::{mount, run, tick, FrameBufferResult, HitRegion, MountHandle};

pub use state::clock::{Scheduler, TaskHandle};
pub use state::count_up::CountUp;
pub use state::reveal::{RevealController, RevealMotion, RevealSpec, RevealStyle, RevealTrigger};
pub use state::scroll::{Region, Viewport};

pub use theme::{Theme, Tone};

//! State Module - Runtime state management systems
//!
//! This module contains the time- and scroll-driven state behind the page:
//!
//! - **Clock** - Cooperative scheduler (intervals, timeouts, task handles)
//! - **Animate** - Easing curves, transitions, scroll-linked mapping
//! - **Reveal** - One-shot viewport reveal latch
//! - **CountUp** - Animated statistic counters
//! - **Scroll** - Viewport offset, block regions, visibility observers
//! - **Clipboard** - Copy buffer, OSC 52, copy acknowledgement
//! - **Chat** - Floating assistant panel
//! - **Input** - crossterm events to actions

pub mod animate;
pub mod chat;
pub mod clipboard;
pub mod clock;
pub mod count_up;
pub mod input;
pub mod reveal;
pub mod scroll;

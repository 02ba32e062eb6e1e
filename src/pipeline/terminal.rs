//! Terminal size signals.
//!
//! The terminal dimensions are the root of the page pipeline: a resize
//! changes the wrap width, which changes layout, block regions and the
//! viewport bounds.

use spark_signals::{signal, Signal};
use std::cell::RefCell;

/// Fallback when the terminal cannot be queried (pipes, CI).
pub const DEFAULT_SIZE: (u16, u16) = (80, 24);

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(DEFAULT_SIZE.0));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(DEFAULT_SIZE.1));
}

pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// (width, height) in cells.
pub fn terminal_size() -> (u16, u16) {
    (terminal_width(), terminal_height())
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| w.borrow().set(width));
    TERMINAL_HEIGHT.with(|h| h.borrow().set(height));
}

pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.borrow().clone())
}

// =============================================================================
// Terminal Detection
// =============================================================================

/// Query the real terminal size and store it.
///
/// Leaves the current value untouched when stdout is not a terminal.
pub fn detect_terminal_size() -> (u16, u16) {
    if let Ok((width, height)) = crossterm::terminal::size() {
        if width > 0 && height > 0 {
            set_terminal_size(width, height);
        }
    }
    terminal_size()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
        assert_eq!(terminal_size(), (120, 40));
    }

    #[test]
    fn test_size_signals_track_updates() {
        let width = terminal_width_signal();
        set_terminal_size(100, 30);
        assert_eq!(width.get(), 100);
        assert_eq!(terminal_height_signal().get(), 30);
    }
}

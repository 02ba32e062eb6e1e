//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the page's actions. Every key,
//! mouse and resize event becomes one [`Action`]; the app never sees raw
//! crossterm types.
//!
//! # API
//!
//! - `convert_key_event` - Map a crossterm KeyEvent to an Action
//! - `convert_mouse_event` - Map a crossterm MouseEvent to an Action
//! - `convert_event` - Map any crossterm Event
//! - `poll_action` - Non-blocking action check with timeout
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::input::{poll_action, Action};
//! use std::time::Duration;
//!
//! loop {
//!     match poll_action(Duration::from_millis(16))? {
//!         Some(Action::Quit) => break,
//!         Some(action) => app.handle(action),
//!         None => {}
//!     }
//! }
//! ```

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use std::time::Duration;

use super::scroll::{LINE_SCROLL, WHEEL_SCROLL};

// =============================================================================
// ACTION ENUM
// =============================================================================

/// Everything the user can ask the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Scroll by rows (negative = up).
    ScrollLines(i32),
    PageUp,
    PageDown,
    Top,
    Bottom,
    CopyEmail,
    ToggleChat,
    /// Jump to the section shortcut with this index.
    Jump(usize),
    /// Left click at a screen cell.
    Click(u16, u16),
    /// Terminal resized (width, height).
    Resize(u16, u16),
    Quit,
    /// Unmapped event.
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Map a crossterm KeyEvent to an Action. Releases are ignored.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }

    match event.code {
        KeyCode::Up | KeyCode::Char('k') => Action::ScrollLines(-LINE_SCROLL),
        KeyCode::Down | KeyCode::Char('j') => Action::ScrollLines(LINE_SCROLL),
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Action::Top,
        KeyCode::End | KeyCode::Char('G') => Action::Bottom,
        KeyCode::Char('c') => Action::CopyEmail,
        KeyCode::Char('?') | KeyCode::Char('t') => Action::ToggleChat,
        KeyCode::Char(c @ '1'..='8') => Action::Jump(c as usize - '1' as usize),
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => Action::None,
    }
}

// =============================================================================
// MOUSE EVENT CONVERSION
// =============================================================================

/// Map a crossterm MouseEvent to an Action.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> Action {
    match event.kind {
        MouseEventKind::ScrollUp => Action::ScrollLines(-WHEEL_SCROLL),
        MouseEventKind::ScrollDown => Action::ScrollLines(WHEEL_SCROLL),
        MouseEventKind::Down(MouseButton::Left) => Action::Click(event.column, event.row),
        _ => Action::None,
    }
}

/// Map any crossterm Event to an Action.
pub fn convert_event(event: CrosstermEvent) -> Action {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(w, h) => Action::Resize(w, h),
        _ => Action::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an action with timeout.
/// Returns None if no event arrived within timeout.
pub fn poll_action(timeout: Duration) -> std::io::Result<Option<Action>> {
    if poll(timeout)? {
        Ok(Some(read_action()?))
    } else {
        Ok(None)
    }
}

/// Read the next action (blocking).
pub fn read_action() -> std::io::Result<Action> {
    Ok(convert_event(read()?))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> CrosstermKeyEvent {
        key_with(code, KeyModifiers::empty())
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermMouseEvent {
        CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn test_scroll_keys() {
        let keys = [
            (KeyCode::Up, Action::ScrollLines(-1)),
            (KeyCode::Char('k'), Action::ScrollLines(-1)),
            (KeyCode::Down, Action::ScrollLines(1)),
            (KeyCode::Char('j'), Action::ScrollLines(1)),
            (KeyCode::PageUp, Action::PageUp),
            (KeyCode::PageDown, Action::PageDown),
            (KeyCode::Char(' '), Action::PageDown),
            (KeyCode::Home, Action::Top),
            (KeyCode::End, Action::Bottom),
        ];

        for (code, expected) in keys {
            assert_eq!(convert_key_event(key(code)), expected, "{code:?}");
        }
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(convert_key_event(key(KeyCode::Char('c'))), Action::CopyEmail);
        assert_eq!(convert_key_event(key(KeyCode::Char('?'))), Action::ToggleChat);
        assert_eq!(convert_key_event(key(KeyCode::Char('t'))), Action::ToggleChat);
        assert_eq!(convert_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(convert_key_event(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(convert_key_event(key(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn test_jump_keys() {
        assert_eq!(convert_key_event(key(KeyCode::Char('1'))), Action::Jump(0));
        assert_eq!(convert_key_event(key(KeyCode::Char('8'))), Action::Jump(7));
        assert_eq!(convert_key_event(key(KeyCode::Char('9'))), Action::None);
        assert_eq!(convert_key_event(key(KeyCode::Char('0'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits_not_copies() {
        let event = key_with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(convert_key_event(event), Action::Quit);

        let event = key_with(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(convert_key_event(event), Action::None);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = key(KeyCode::Down);
        event.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(event), Action::None);

        event.kind = KeyEventKind::Repeat;
        assert_eq!(convert_key_event(event), Action::ScrollLines(1));
    }

    #[test]
    fn test_mouse_wheel() {
        assert_eq!(
            convert_mouse_event(mouse(MouseEventKind::ScrollDown, 0, 0)),
            Action::ScrollLines(3)
        );
        assert_eq!(
            convert_mouse_event(mouse(MouseEventKind::ScrollUp, 0, 0)),
            Action::ScrollLines(-3)
        );
    }

    #[test]
    fn test_mouse_click() {
        assert_eq!(
            convert_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            Action::Click(10, 5)
        );
        assert_eq!(
            convert_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 5)),
            Action::None
        );
        assert_eq!(
            convert_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 5)),
            Action::None
        );
        assert_eq!(convert_mouse_event(mouse(MouseEventKind::Moved, 1, 1)), Action::None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(convert_event(CrosstermEvent::Resize(120, 40)), Action::Resize(120, 40));
        assert_eq!(convert_event(CrosstermEvent::FocusGained), Action::None);
    }
}

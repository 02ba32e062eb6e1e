//! Clipboard Module - Copy-to-clipboard with acknowledgement
//!
//! Copying stores text in a process-local buffer and encodes it as an
//! OSC 52 sequence so the host terminal can place it on the system
//! clipboard. The buffer works even when the terminal ignores OSC 52.
//!
//! [`CopyAck`] is the transient "copied" flag shown by the contact panel:
//! true for a fixed window after the most recent copy, then false again.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::clipboard;
//!
//! let seq = clipboard::copy("me@example.com");
//! assert_eq!(clipboard::paste().as_deref(), Some("me@example.com"));
//! ```

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use spark_signals::{signal, Signal};
use tracing::debug;

use super::clock::{Scheduler, TaskHandle};

// =============================================================================
// Internal Buffer
// =============================================================================

thread_local! {
    static CLIPBOARD_BUFFER: RefCell<Option<String>> = const { RefCell::new(None) };
}

// =============================================================================
// Public API
// =============================================================================

/// Copy text to the clipboard buffer.
///
/// Returns the OSC 52 sequence to write to the terminal, or `None` for empty
/// text (clipboard not modified).
pub fn copy(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = Some(text.to_string());
    });

    Some(osc52_sequence(text))
}

/// Most recently copied text.
pub fn paste() -> Option<String> {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().clone())
}

pub fn clear() {
    CLIPBOARD_BUFFER.with(|buf| {
        *buf.borrow_mut() = None;
    });
}

pub fn has_content() -> bool {
    CLIPBOARD_BUFFER.with(|buf| buf.borrow().is_some())
}

/// OSC 52 "set clipboard" sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Copy `text` and push it to the terminal's system clipboard via `out`.
pub fn copy_to<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    if let Some(seq) = copy(text) {
        out.write_all(seq.as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

// =============================================================================
// Copy Acknowledgement
// =============================================================================

/// Transient "copied" flag with a restartable expiry window.
///
/// Each `trigger()` sets the flag and replaces any pending expiry, so the flag
/// stays up for a full window after the latest trigger.
pub struct CopyAck {
    scheduler: Scheduler,
    window: Duration,
    copied: Signal<bool>,
    expiry: Rc<RefCell<Option<TaskHandle>>>,
}

impl CopyAck {
    pub fn new(scheduler: &Scheduler, window: Duration) -> Self {
        Self {
            scheduler: scheduler.clone(),
            window,
            copied: signal(false),
            expiry: Rc::new(RefCell::new(None)),
        }
    }

    pub fn trigger(&self) {
        self.copied.set(true);

        let copied = self.copied.clone();
        let slot = self.expiry.clone();
        let handle = self.scheduler.set_timeout(self.window, move || {
            copied.set(false);
            if let Ok(mut slot) = slot.try_borrow_mut() {
                slot.take();
            }
            debug!("copy acknowledgement expired");
        });

        // Replacing the old handle cancels the previous expiry
        *self.expiry.borrow_mut() = Some(handle);
    }

    pub fn is_copied(&self) -> bool {
        self.copied.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.copied.clone()
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Button label for the current state.
    pub fn label(&self) -> &'static str {
        if self.is_copied() { "Copied!" } else { "Copy Email" }
    }
}

impl Drop for CopyAck {
    fn drop(&mut self) {
        if let Some(handle) = self.expiry.borrow_mut().take() {
            handle.cancel();
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

//! Mount API - Terminal lifecycle and the event loop.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::pipeline::mount;
//!
//! let mut handle = mount::mount("Manoj Mannam")?;
//!
//! // Option 1: Run blocking event loop
//! mount::run(&mut handle, &mut app)?;
//!
//! // Option 2: Tick manually in your own loop
//! while mount::tick(&mut handle, &mut app)? {
//!     // Your logic here
//! }
//!
//! handle.unmount()?;
//! ```

use std::io::{self, Stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tracing::{debug, info};

use crate::app::App;
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::input::{self, Action};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]. Owns the terminal until unmounted or dropped.
///
/// Holds:
/// - The running flag (cleared on quit or [`stop`](Self::stop))
/// - The diff renderer and its output stream
/// - The start instant all app time is measured from
pub struct MountHandle {
    running: Arc<AtomicBool>,
    renderer: DiffRenderer,
    out: Stdout,
    started: Instant,
    restored: bool,
}

impl MountHandle {
    /// Stop and restore the terminal.
    pub fn unmount(mut self) -> io::Result<()> {
        self.running.store(false, Ordering::SeqCst);
        self.restore()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Request a graceful shutdown; the next [`tick`] returns `false`.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Time since mount.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Diff `buffer` against the previous frame and write the changes.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        self.renderer.render(buffer, &mut self.out)
    }

    /// Write an escape sequence straight to the terminal.
    pub fn write_raw(&mut self, sequence: &str) -> io::Result<()> {
        self.out.write_all(sequence.as_bytes())?;
        self.out.flush()
    }

    /// Force the next render to repaint every cell.
    pub fn invalidate(&mut self) {
        self.renderer.invalidate();
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // Attempt every step even if an earlier one fails
        let mouse = execute!(self.out, DisableMouseCapture);
        let screen = self.renderer.exit_fullscreen(&mut self.out);
        let raw = disable_raw_mode();
        debug!("terminal restored");
        mouse.and(screen).and(raw)
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Take over the terminal.
///
/// This sets up:
/// 1. Raw mode (Ctrl+C arrives as a key event)
/// 2. The alternate screen with a hidden cursor and `title`
/// 3. Mouse capture (wheel scrolling, clicks)
pub fn mount(title: &str) -> io::Result<MountHandle> {
    enable_raw_mode()?;

    // From here on, Drop restores the terminal on early return
    let mut handle = MountHandle {
        running: Arc::new(AtomicBool::new(true)),
        renderer: DiffRenderer::new(),
        out: io::stdout(),
        started: Instant::now(),
        restored: false,
    };
    handle.renderer.enter_fullscreen(&mut handle.out, title)?;
    execute!(handle.out, EnableMouseCapture)?;

    info!(title, "mounted");
    Ok(handle)
}

// =============================================================================
// Event Loop
// =============================================================================

/// Flush queued escape sequences and paint a frame if anything changed.
fn present(handle: &mut MountHandle, app: &mut App, now: Duration) -> io::Result<()> {
    for sequence in app.take_output() {
        handle.write_raw(&sequence)?;
    }
    if app.needs_render(now) {
        let frame = app.frame(now);
        handle.render(&frame.buffer)?;
    }
    Ok(())
}

/// Run the event loop once.
///
/// Blocks for at most the app's poll timeout: one animation frame while
/// something is moving, otherwise until the next scheduled task.
///
/// * `Ok(true)` - Continue running
/// * `Ok(false)` - Quit requested or `handle.stop()` called
/// * `Err(e)` - I/O error while polling or writing
pub fn tick(handle: &mut MountHandle, app: &mut App) -> io::Result<bool> {
    if !handle.is_running() {
        return Ok(false);
    }

    let timeout = app.poll_timeout(handle.elapsed());
    if let Some(action) = input::poll_action(timeout)? {
        if matches!(action, Action::Resize(..)) {
            handle.invalidate();
        }
        if !app.handle(action, handle.elapsed()) {
            handle.stop();
            return Ok(false);
        }
    }

    let now = handle.elapsed();
    app.update(now);
    present(handle, app, now)?;

    Ok(handle.is_running())
}

/// Run the event loop until quit.
pub fn run(handle: &mut MountHandle, app: &mut App) -> io::Result<()> {
    let now = handle.elapsed();
    app.update(now);
    present(handle, app, now)?;

    while tick(handle, app)? {}
    Ok(())
}

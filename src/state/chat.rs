//! Chat Widget - Floating assistant panel
//!
//! A launcher button sits in the bottom-right corner and breathes with a
//! slow pulse. Toggling it pops a small panel in with a spring curve. The
//! panel shows a fixed greeting and an input placeholder; there is no
//! message state.

use std::time::Duration;

use spark_signals::{signal, Signal};

use super::animate::{pulse, Easing, Transition};

pub const GREETING: &str = "Hello! I'm an AI assistant. How can I help you?";
pub const PLACEHOLDER: &str = "Type your message...";
pub const TITLE: &str = "Chatbot";

/// Launcher breathing period.
pub const PULSE_PERIOD: Duration = Duration::from_secs(2);
/// Peak extra scale of the launcher (1.0 -> 1.1 -> 1.0).
pub const PULSE_AMPLITUDE: f32 = 0.1;
/// Panel pop-in duration.
pub const POP_DURATION: Duration = Duration::from_millis(400);

pub struct ChatWidget {
    open: Signal<bool>,
    toggled_at: Option<Duration>,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            open: signal(false),
            toggled_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    /// Flip open/closed. Returns the new state.
    pub fn toggle(&mut self, now: Duration) -> bool {
        let open = !self.open.get();
        self.open.set(open);
        self.toggled_at = Some(now);
        open
    }

    /// Panel scale in `0..=1` (spring may overshoot slightly above 1).
    ///
    /// Closing is instant; only opening animates.
    pub fn panel_scale(&self, now: Duration) -> f32 {
        if !self.is_open() {
            return 0.0;
        }
        match self.toggled_at {
            Some(start) => Transition::new(start, POP_DURATION, Easing::Spring).progress(now),
            None => 1.0,
        }
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        match (self.is_open(), self.toggled_at) {
            (true, Some(start)) => !Transition::new(start, POP_DURATION, Easing::Spring).is_finished(now),
            _ => false,
        }
    }

    /// Launcher scale at `now`, never below 1.0.
    pub fn launcher_scale(&self, now: Duration) -> f32 {
        1.0 + pulse(now, PULSE_PERIOD, PULSE_AMPLITUDE)
    }

    /// Launcher glyph: emphasized during the top half of the pulse.
    pub fn launcher_emphasized(&self, now: Duration) -> bool {
        self.launcher_scale(now) > 1.0 + PULSE_AMPLITUDE / 2.0
    }
}

impl Default for ChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("open", &self.is_open())
            .field("toggled_at", &self.toggled_at)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_toggle() {
        let mut chat = ChatWidget::new();
        assert!(!chat.is_open());
        assert!(chat.toggle(ms(0)));
        assert!(chat.is_open());
        assert!(!chat.toggle(ms(100)));
        assert!(!chat.is_open());
    }

    #[test]
    fn test_panel_pops_in() {
        let mut chat = ChatWidget::new();
        assert_eq!(chat.panel_scale(ms(0)), 0.0);

        chat.toggle(ms(1000));
        assert_eq!(chat.panel_scale(ms(1000)), 0.0);
        assert!(chat.is_animating(ms(1100)));
        assert_eq!(chat.panel_scale(ms(1400)), 1.0);
        assert!(!chat.is_animating(ms(1400)));
    }

    #[test]
    fn test_closing_is_instant() {
        let mut chat = ChatWidget::new();
        chat.toggle(ms(0));
        chat.toggle(ms(50));
        assert_eq!(chat.panel_scale(ms(60)), 0.0);
        assert!(!chat.is_animating(ms(60)));
    }

    #[test]
    fn test_launcher_pulse_bounds() {
        let chat = ChatWidget::new();
        for t in (0..4000).step_by(50) {
            let scale = chat.launcher_scale(ms(t));
            assert!((1.0..=1.1 + 1e-6).contains(&scale), "scale {scale} at {t}ms");
        }
        assert!((chat.launcher_scale(ms(0)) - 1.0).abs() < 1e-6);
        assert!((chat.launcher_scale(ms(1000)) - 1.1).abs() < 1e-6);
        assert!(chat.launcher_emphasized(ms(1000)));
        assert!(!chat.launcher_emphasized(ms(0)));
    }

    #[test]
    fn test_texts() {
        assert_eq!(GREETING, "Hello! I'm an AI assistant. How can I help you?");
        assert_eq!(PLACEHOLDER, "Type your message...");
    }
}

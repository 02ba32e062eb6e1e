//! Reveal Controller - One-shot viewport reveal latch
//!
//! Each content block owns a controller. Visibility observations (the
//! fraction of the block's area inside the viewport) are fed in; the first
//! one that meets the threshold latches `revealed = true`. After that the
//! controller ignores further observations, so scrolling back up never
//! hides a block again.
//!
//! The latch is a reactive signal so anything tracking it re-runs exactly
//! once, on the false -> true edge.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::reveal::RevealController;
//! use std::time::Duration;
//!
//! let mut reveal = RevealController::new(0.1);
//! reveal.observe(0.05, Duration::ZERO);   // not enough
//! reveal.observe(0.25, Duration::from_millis(16)); // latches
//! assert!(reveal.is_revealed());
//! ```

use std::time::Duration;

use spark_signals::{signal, Signal};

use super::animate::{Easing, Transition};

// =============================================================================
// REVEAL SPEC
// =============================================================================

/// What makes a block reveal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RevealTrigger {
    /// Reveal when the visible fraction reaches `threshold`.
    ///
    /// A threshold of 0.0 means "any visible part".
    InView { threshold: f32 },
    /// Reveal as soon as the block mounts (entrance animations).
    Mount,
}

/// How a hidden block differs from its resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMotion {
    /// Starts `rows` below its resting row, transparent.
    SlideUp(u16),
    /// Transparent only.
    Fade,
}

/// Full description of a block's reveal behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealSpec {
    pub trigger: RevealTrigger,
    pub motion: RevealMotion,
    /// Stagger delay after the trigger.
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl RevealSpec {
    pub fn in_view(threshold: f32, motion: RevealMotion, duration: Duration) -> Self {
        Self {
            trigger: RevealTrigger::InView { threshold },
            motion,
            delay: Duration::ZERO,
            duration,
            easing: Easing::EaseOut,
        }
    }

    pub fn on_mount(motion: RevealMotion, duration: Duration) -> Self {
        Self {
            trigger: RevealTrigger::Mount,
            motion,
            delay: Duration::ZERO,
            duration,
            easing: Easing::EaseOut,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// Visual state handed to the painter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    /// 0.0 = fully faded into the backdrop, 1.0 = opaque.
    pub opacity: f32,
    /// Rows below the resting position.
    pub offset_rows: u16,
}

impl RevealStyle {
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        offset_rows: 0,
    };

    pub fn hidden(motion: RevealMotion) -> Self {
        Self {
            opacity: 0.0,
            offset_rows: match motion {
                RevealMotion::SlideUp(rows) => rows,
                RevealMotion::Fade => 0,
            },
        }
    }

    pub fn is_settled(&self) -> bool {
        *self == Self::SHOWN
    }
}

// =============================================================================
// REVEAL CONTROLLER
// =============================================================================

/// Check whether one observation satisfies a threshold.
#[inline]
pub fn meets_threshold(fraction: f32, threshold: f32) -> bool {
    fraction > 0.0 && fraction >= threshold
}

pub struct RevealController {
    threshold: f32,
    revealed: Signal<bool>,
    revealed_at: Option<Duration>,
}

impl RevealController {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            revealed: signal(false),
            revealed_at: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed one visibility observation.
    ///
    /// Returns `true` only for the observation that latched the reveal.
    pub fn observe(&mut self, fraction: f32, now: Duration) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        if !meets_threshold(fraction, self.threshold) {
            return false;
        }
        self.latch(now);
        true
    }

    /// Reveal unconditionally (mount-triggered blocks).
    ///
    /// Returns `false` if already revealed.
    pub fn reveal_now(&mut self, now: Duration) -> bool {
        if self.revealed_at.is_some() {
            return false;
        }
        self.latch(now);
        true
    }

    fn latch(&mut self, now: Duration) {
        self.revealed_at = Some(now);
        self.revealed.set(true);
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Scheduler time at which the latch closed.
    pub fn revealed_at(&self) -> Option<Duration> {
        self.revealed_at
    }

    /// Reactive view of the latch.
    pub fn signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }

    /// Visual state at `now` for a block animated per `spec`.
    pub fn style(&self, spec: &RevealSpec, now: Duration) -> RevealStyle {
        let Some(start) = self.revealed_at else {
            return RevealStyle::hidden(spec.motion);
        };

        let progress = Transition::new(start, spec.duration, spec.easing)
            .with_delay(spec.delay)
            .progress(now);
        if progress >= 1.0 {
            return RevealStyle::SHOWN;
        }

        let hidden = RevealStyle::hidden(spec.motion);
        RevealStyle {
            opacity: progress,
            offset_rows: (hidden.offset_rows as f32 * (1.0 - progress)).round() as u16,
        }
    }

    /// Whether the enter transition is still running at `now`.
    pub fn is_animating(&self, spec: &RevealSpec, now: Duration) -> bool {
        match self.revealed_at {
            Some(start) => !Transition::new(start, spec.duration, spec.easing)
                .with_delay(spec.delay)
                .is_finished(now),
            None => false,
        }
    }
}

impl std::fmt::Debug for RevealController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealController")
            .field("threshold", &self.threshold)
            .field("revealed_at", &self.revealed_at)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

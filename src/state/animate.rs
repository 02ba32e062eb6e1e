//! Animation timing - Easing curves and transitions
//!
//! Pure functions of time. Nothing here owns a timer; the renderer asks a
//! [`Transition`] for its progress at the current scheduler time each frame.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::animate::{Easing, Transition};
//! use std::time::Duration;
//!
//! let t = Transition::new(Duration::ZERO, Duration::from_millis(800), Easing::EaseOut);
//! let halfway = t.progress(Duration::from_millis(400)); // > 0.5, decelerating
//! ```

use std::f32::consts::PI;
use std::time::Duration;

// =============================================================================
// EASING
// =============================================================================

/// Easing curve applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Deceleration: cubic-bezier(0, 0, 0.58, 1).
    #[default]
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1).
    EaseInOut,
    /// Underdamped spring settling at 1.0 (slight overshoot).
    Spring,
}

/// Apply `easing` to `t` (clamped to 0..=1).
pub fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
        Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
        Easing::Spring => spring(t),
    }
}

/// Evaluate a CSS-style cubic bezier (endpoints fixed at 0,0 and 1,1).
///
/// Solves x(s) = t for s with Newton iterations, falling back to bisection
/// when the slope flattens.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let bezier = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
    };
    let slope = |a: f32, b: f32, s: f32| {
        let inv = 1.0 - s;
        3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
    };

    let mut s = t;
    for _ in 0..8 {
        let x = bezier(x1, x2, s) - t;
        if x.abs() < 1e-5 {
            return bezier(y1, y2, s);
        }
        let d = slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s = (s - x / d).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = t;
    for _ in 0..32 {
        let x = bezier(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier(y1, y2, s)
}

/// Damped oscillation approximating a stiff spring (stiffness 260, damping 20).
fn spring(t: f32) -> f32 {
    if t >= 1.0 {
        return 1.0;
    }
    1.0 - (-6.0 * t).exp() * (2.5 * PI * t).cos()
}

// =============================================================================
// TRANSITION
// =============================================================================

/// A one-shot transition from 0.0 to 1.0.
///
/// Starts at `start + delay`, runs for `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub start: Duration,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    pub fn new(start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            delay: Duration::ZERO,
            duration,
            easing,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Linear (un-eased) progress at `now`.
    pub fn raw_progress(&self, now: Duration) -> f32 {
        let begin = self.start + self.delay;
        if now <= begin {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        ((now - begin).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased progress at `now`.
    pub fn progress(&self, now: Duration) -> f32 {
        ease(self.easing, self.raw_progress(now))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.start + self.delay + self.duration
    }
}

// =============================================================================
// SCROLL-LINKED VALUES
// =============================================================================

/// Clamped linear mapping of `value` from `input` range onto `output` range.
pub fn map_range(value: f32, input: (f32, f32), output: (f32, f32)) -> f32 {
    let (in_lo, in_hi) = input;
    let (out_lo, out_hi) = output;
    if (in_hi - in_lo).abs() < f32::EPSILON {
        return if value < in_lo { out_lo } else { out_hi };
    }
    let t = ((value - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

/// Breathing pulse: 0.0 at each period boundary, `amplitude` at mid-period.
pub fn pulse(now: Duration, period: Duration, amplitude: f32) -> f32 {
    if period.is_zero() {
        return 0.0;
    }
    let phase = (now.as_secs_f32() % period.as_secs_f32()) / period.as_secs_f32();
    amplitude * (PI * phase).sin()
}

// =============================================================================
// TESTS
// =============================================================================

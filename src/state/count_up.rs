//! Count-Up Timer - Animated integer display
//!
//! Animates a displayed integer from 0 to a target over roughly the requested
//! duration, at a fixed tick rate (60 Hz by default).
//!
//! # Stepping
//!
//! ```text
//! step = max(1, ceil(target / (duration_secs * tick_rate)))
//! each tick: current += step; once current >= target, current = target and stop
//! ```
//!
//! The ramp is linear with a final clamp, so the real time to reach the
//! target is `ceil(target / step) / tick_rate` seconds. That can be shorter
//! than requested by up to one tick when the target is not a multiple of the
//! step; the approximation is intentional.
//!
//! # Lifecycle
//!
//! The tick source is a scheduler interval owned by the [`CountUp`]. Changing
//! parameters cancels it and starts a fresh run from 0; dropping the
//! [`CountUp`] cancels it, so a torn-down display never receives ticks.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use spark_signals::{signal, Signal};
use tracing::debug;

use super::clock::{Scheduler, TaskHandle};
use crate::format::format_thousands;

/// Default ticks per second.
pub const DEFAULT_TICK_RATE: u32 = 60;

// =============================================================================
// COUNTER STATE (pure stepping)
// =============================================================================

/// Increment applied per tick.
pub fn step_for(target: u64, duration_secs: f64, tick_rate: u32) -> u64 {
    let ticks = duration_secs * tick_rate as f64;
    if !(ticks > 0.0) {
        return target.max(1);
    }
    ((target as f64 / ticks).ceil() as u64).max(1)
}

/// Pure count-up state. `0 <= current <= target` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterState {
    current: u64,
    target: u64,
    duration_secs: f64,
    step: u64,
    ticks: u64,
}

impl CounterState {
    pub fn new(target: u64, duration_secs: f64, tick_rate: u32) -> Self {
        Self {
            current: 0,
            target,
            duration_secs,
            step: step_for(target, duration_secs, tick_rate),
            ticks: 0,
        }
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.target
    }

    /// Total ticks a run takes: `ceil(target / step)`.
    pub fn ticks_to_finish(&self) -> u64 {
        self.target.div_ceil(self.step)
    }

    /// Apply one tick. Returns `true` once the target is reached.
    ///
    /// Ticking a finished counter changes nothing.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return true;
        }
        self.ticks += 1;
        self.current = self.current.saturating_add(self.step);
        if self.current >= self.target {
            self.current = self.target;
            return true;
        }
        false
    }
}

// =============================================================================
// COUNT-UP (scheduled)
// =============================================================================

/// A count-up bound to a scheduler interval.
pub struct CountUp {
    scheduler: Scheduler,
    tick_rate: u32,
    state: Rc<RefCell<CounterState>>,
    current: Signal<u64>,
    task: Rc<RefCell<Option<TaskHandle>>>,
}

impl CountUp {
    /// Create and immediately start counting towards `target`.
    pub fn start(scheduler: &Scheduler, target: u64, duration_secs: f64, tick_rate: u32) -> Self {
        let mut count_up = Self {
            scheduler: scheduler.clone(),
            tick_rate: tick_rate.max(1),
            state: Rc::new(RefCell::new(CounterState::new(target, duration_secs, tick_rate))),
            current: signal(0),
            task: Rc::new(RefCell::new(None)),
        };
        count_up.run(target, duration_secs);
        count_up
    }

    /// Restart from 0 if `target` or `duration_secs` changed.
    ///
    /// Returns `true` if a restart happened.
    pub fn set_params(&mut self, target: u64, duration_secs: f64) -> bool {
        let (old_target, old_duration) = {
            let state = self.state.borrow();
            (state.target(), state.duration_secs())
        };
        if old_target == target && old_duration == duration_secs {
            return false;
        }
        self.run(target, duration_secs);
        true
    }

    fn run(&mut self, target: u64, duration_secs: f64) {
        // Cancel the previous tick source before anything else
        self.stop();

        // Fresh state cell so nothing from a previous run can write here
        let state = Rc::new(RefCell::new(CounterState::new(
            target,
            duration_secs,
            self.tick_rate,
        )));
        self.state = state.clone();
        self.current.set(0);

        if state.borrow().is_finished() {
            return;
        }

        debug!(
            target,
            duration_secs,
            step = state.borrow().step(),
            "count-up started"
        );

        let current = self.current.clone();
        let task_slot = self.task.clone();
        let period = Duration::from_secs_f64(1.0 / self.tick_rate as f64);
        let handle = self.scheduler.set_interval(period, move || {
            let (done, value, ticks) = {
                let mut state = state.borrow_mut();
                let done = state.tick();
                (done, state.current(), state.ticks())
            };
            current.set(value);
            if done {
                debug!(value, ticks, "count-up finished");
                // Release our own tick source
                if let Ok(mut slot) = task_slot.try_borrow_mut() {
                    slot.take();
                }
            }
        });
        *self.task.borrow_mut() = Some(handle);
    }

    /// Cancel the tick source, freezing the displayed value.
    pub fn stop(&mut self) {
        if let Some(handle) = self.task.borrow_mut().take() {
            handle.cancel();
        }
    }

    pub fn current(&self) -> u64 {
        self.current.get()
    }

    pub fn target(&self) -> u64 {
        self.state.borrow().target()
    }

    pub fn step(&self) -> u64 {
        self.state.borrow().step()
    }

    /// Reactive view of the displayed value.
    pub fn signal(&self) -> Signal<u64> {
        self.current.clone()
    }

    /// Whether a tick source is live.
    pub fn is_running(&self) -> bool {
        self.task
            .borrow()
            .as_ref()
            .map(TaskHandle::is_active)
            .unwrap_or(false)
    }

    /// Displayed value with thousands separators.
    pub fn display(&self) -> String {
        format_thousands(self.current())
    }
}

impl Drop for CountUp {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for CountUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountUp")
            .field("state", &*self.state.borrow())
            .field("running", &self.is_running())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

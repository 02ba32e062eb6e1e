//! Cooperative Scheduler - Timers on the event loop
//!
//! All repeating and delayed work (count-up ticks, copy acknowledgement
//! expiry) runs as tasks on one scheduler driven by the event loop. Nothing
//! runs on another thread; `advance()` executes due callbacks inline.
//!
//! # Pattern
//!
//! - `set_interval` / `set_timeout` return a [`TaskHandle`]
//! - Dropping or cancelling the handle removes the task
//! - Callbacks may cancel their own task or schedule new ones
//!
//! Time is a `Duration` since scheduler start. The event loop feeds wall-clock
//! time; tests feed whatever they like.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::state::clock::Scheduler;
//! use std::time::Duration;
//!
//! let scheduler = Scheduler::new();
//! let handle = scheduler.set_interval(Duration::from_millis(16), || { /* tick */ });
//!
//! scheduler.advance(Duration::from_millis(100));
//! handle.cancel();
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

use tracing::trace;

// =============================================================================
// TASK STORAGE
// =============================================================================

type Callback = Box<dyn FnMut()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

struct Task {
    due: Duration,
    /// `Some` for intervals, `None` for one-shot timeouts.
    period: Option<Duration>,
    /// Taken out while the callback runs so it can re-enter the scheduler.
    callback: Option<Callback>,
}

#[derive(Default)]
struct SchedulerInner {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskId, Task>,
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Single-threaded timer scheduler.
///
/// Cheap to clone; clones share the same task table.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scheduler time (the last value passed to `advance`).
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Run `callback` every `period`, first at `now + period`.
    ///
    /// Intervals are fixed-rate: if `advance` jumps over several periods the
    /// callback runs once per missed period.
    pub fn set_interval(&self, period: Duration, callback: impl FnMut() + 'static) -> TaskHandle {
        let period = period.max(Duration::from_nanos(1));
        self.insert(period, Some(period), Box::new(callback))
    }

    /// Run `callback` once at `now + delay`.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TaskHandle {
        let mut callback = Some(callback);
        self.insert(
            delay,
            None,
            Box::new(move || {
                if let Some(f) = callback.take() {
                    f();
                }
            }),
        )
    }

    fn insert(&self, delay: Duration, period: Option<Duration>, callback: Callback) -> TaskHandle {
        let mut inner = self.inner.borrow_mut();
        let id = TaskId(inner.next_id);
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.tasks.insert(
            id,
            Task {
                due,
                period,
                callback: Some(callback),
            },
        );
        trace!(?id, ?due, "task scheduled");

        TaskHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Advance time to `now` and run every task that falls due, in due order.
    ///
    /// Returns the number of callbacks executed. Time never moves backwards;
    /// an earlier `now` is ignored.
    pub fn advance(&self, now: Duration) -> usize {
        {
            let mut inner = self.inner.borrow_mut();
            if now < inner.now {
                return 0;
            }
        }

        let mut executed = 0;
        loop {
            // Earliest due task at or before `now`
            let next = {
                let inner = self.inner.borrow();
                inner
                    .tasks
                    .iter()
                    .filter(|(_, task)| task.due <= now && task.callback.is_some())
                    .min_by_key(|(id, task)| (task.due, **id))
                    .map(|(id, task)| (*id, task.due))
            };

            let Some((id, due)) = next else {
                break;
            };

            let mut callback = {
                let mut inner = self.inner.borrow_mut();
                inner.now = due;
                match inner.tasks.get_mut(&id).and_then(|task| task.callback.take()) {
                    Some(cb) => cb,
                    None => continue,
                }
            };

            callback();
            executed += 1;

            // Put the callback back unless the task was cancelled while running
            let mut inner = self.inner.borrow_mut();
            let reschedule = match inner.tasks.get_mut(&id) {
                Some(task) => match task.period {
                    Some(period) => {
                        task.due += period;
                        task.callback = Some(callback);
                        true
                    }
                    None => false,
                },
                None => true,
            };
            if !reschedule {
                inner.tasks.remove(&id);
            }
        }

        self.inner.borrow_mut().now = now;
        executed
    }

    /// Earliest pending deadline, if any task is scheduled.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner.borrow().tasks.values().map(|task| task.due).min()
    }

    /// Number of live tasks.
    pub fn active_tasks(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Drop every task (handles become inert).
    pub fn clear(&self) {
        self.inner.borrow_mut().tasks.clear();
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Scheduler")
            .field("now", &inner.now)
            .field("tasks", &inner.tasks.len())
            .finish()
    }
}

// =============================================================================
// TASK HANDLE
// =============================================================================

/// Owns a scheduled task. Dropping the handle cancels the task.
#[must_use = "dropping a TaskHandle cancels the task"]
pub struct TaskHandle {
    id: TaskId,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl TaskHandle {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Whether the task is still scheduled.
    ///
    /// One-shot timeouts become inactive after they fire.
    pub fn is_active(&self) -> bool {
        self.scheduler
            .upgrade()
            .map(|inner| inner.borrow().tasks.contains_key(&self.id))
            .unwrap_or(false)
    }

    /// Cancel the task. Safe to call from inside the task's own callback.
    pub fn cancel(&self) {
        if let Some(inner) = self.scheduler.upgrade() {
            // Scheduler may be mid-advance with this task's callback taken out;
            // removing the entry is enough for advance() to drop it.
            if let Ok(mut inner) = inner.try_borrow_mut() {
                if inner.tasks.remove(&self.id).is_some() {
                    trace!(id = ?self.id, "task cancelled");
                }
            }
        }
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timeout_fires_once() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(Cell::new(0));
        let f = fired.clone();
        let handle = scheduler.set_timeout(ms(100), move || f.set(f.get() + 1));

        scheduler.advance(ms(99));
        assert_eq!(fired.get(), 0);
        assert!(handle.is_active());

        scheduler.advance(ms(100));
        assert_eq!(fired.get(), 1);
        assert!(!handle.is_active());

        scheduler.advance(ms(500));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_interval_catches_up() {
        let scheduler = Scheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let _handle = scheduler.set_interval(ms(10), move || t.set(t.get() + 1));

        assert_eq!(scheduler.advance(ms(35)), 3);
        assert_eq!(ticks.get(), 3);

        scheduler.advance(ms(40));
        assert_eq!(ticks.get(), 4);
    }

    #[test]
    fn test_drop_cancels() {
        let scheduler = Scheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let t = ticks.clone();
        let handle = scheduler.set_interval(ms(10), move || t.set(t.get() + 1));
        assert_eq!(scheduler.active_tasks(), 1);

        drop(handle);
        assert_eq!(scheduler.active_tasks(), 0);

        scheduler.advance(ms(100));
        assert_eq!(ticks.get(), 0);
    }

    #[test]
    fn test_cancel_from_inside_callback() {
        let scheduler = Scheduler::new();
        let ticks = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<TaskHandle>>> = Rc::new(RefCell::new(None));

        let t = ticks.clone();
        let s = slot.clone();
        let handle = scheduler.set_interval(ms(10), move || {
            t.set(t.get() + 1);
            if t.get() == 3 {
                if let Some(h) = s.borrow().as_ref() {
                    h.cancel();
                }
            }
        });
        *slot.borrow_mut() = Some(handle);

        scheduler.advance(ms(1000));
        assert_eq!(ticks.get(), 3);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_due_order_across_tasks() {
        let scheduler = Scheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        let _a = scheduler.set_timeout(ms(30), move || o.borrow_mut().push("a"));
        let o = order.clone();
        let _b = scheduler.set_timeout(ms(10), move || o.borrow_mut().push("b"));
        let o = order.clone();
        let _c = scheduler.set_interval(ms(20), move || o.borrow_mut().push("c"));

        scheduler.advance(ms(45));
        assert_eq!(*order.borrow(), vec!["b", "c", "a", "c"]);
    }

    #[test]
    fn test_callback_sees_due_time() {
        let scheduler = Scheduler::new();
        let seen = Rc::new(Cell::new(Duration::ZERO));
        let s = seen.clone();
        let sched = scheduler.clone();
        let _h = scheduler.set_timeout(ms(25), move || s.set(sched.now()));

        scheduler.advance(ms(1000));
        assert_eq!(seen.get(), ms(25));
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_schedule_from_callback() {
        let scheduler = Scheduler::new();
        let fired = Rc::new(Cell::new(false));
        let keep: Rc<RefCell<Vec<TaskHandle>>> = Rc::new(RefCell::new(Vec::new()));

        let sched = scheduler.clone();
        let f = fired.clone();
        let k = keep.clone();
        let _outer = scheduler.set_timeout(ms(10), move || {
            let f = f.clone();
            let inner = sched.set_timeout(ms(10), move || f.set(true));
            k.borrow_mut().push(inner);
        });

        scheduler.advance(ms(15));
        assert!(!fired.get());
        scheduler.advance(ms(20));
        assert!(fired.get());
    }

    #[test]
    fn test_next_deadline() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.next_deadline(), None);

        let _a = scheduler.set_timeout(ms(50), || {});
        let _b = scheduler.set_interval(ms(16), || {});
        assert_eq!(scheduler.next_deadline(), Some(ms(16)));
    }

    #[test]
    fn test_time_never_moves_backwards() {
        let scheduler = Scheduler::new();
        scheduler.advance(ms(100));
        assert_eq!(scheduler.advance(ms(50)), 0);
        assert_eq!(scheduler.now(), ms(100));
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let scheduler = Scheduler::new();
        let handle = scheduler.set_timeout(ms(10), || {});
        drop(scheduler);

        assert!(!handle.is_active());
        handle.cancel();
    }
}

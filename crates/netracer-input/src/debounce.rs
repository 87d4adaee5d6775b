//! Debounced input.
//!
//! A [`DebouncedInput`] sits between a text box and an expensive consumer
//! such as a table filter. Every keystroke updates the pending value at once,
//! but the consumer only hears about it after the user has stopped typing
//! for the configured interval.
//!
//! Nothing runs in the background. The host calls [`DebouncedInput::poll`]
//! from its event loop and the commit fires from inside that call.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use netracer_input::{DebounceConfig, DebouncedInput, MockClock};
//!
//! let committed = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&committed);
//! let clock = MockClock::new();
//!
//! let mut search = DebouncedInput::with_clock(
//!     String::new(),
//!     DebounceConfig::default(),
//!     clock.clone(),
//!     move |value: &String| sink.borrow_mut().push(value.clone()),
//! );
//!
//! search.input("1".to_string());
//! search.input("10.".to_string());
//! clock.advance(Duration::from_millis(500));
//! assert!(search.poll());
//! assert_eq!(*committed.borrow(), vec!["10.".to_string()]);
//! ```

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};

/// Default quiet period before a commit, in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Debounce settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiet period after the last keystroke, in milliseconds.
    pub interval_ms: u64,
}

impl DebounceConfig {
    /// Creates a config with the given quiet period.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: u64::try_from(interval.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Returns the quiet period.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

// ============================================================================
// Timer
// ============================================================================

/// Single-shot deadline that can be re-armed or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates a disarmed timer.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    /// Arms the timer to fire one interval after `now`, replacing any
    /// earlier deadline.
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Disarms the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` while a deadline is set.
    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns the deadline, if armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if armed and the deadline has been reached.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Returns the interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

// ============================================================================
// Input
// ============================================================================

/// Input whose commits are delayed until typing pauses.
pub struct DebouncedInput<V, C: Clock = SystemClock> {
    value: V,
    timer: DebounceTimer,
    clock: C,
    on_commit: Box<dyn FnMut(&V)>,
}

impl<V> DebouncedInput<V, SystemClock> {
    /// Creates an input on the system clock.
    pub fn new(initial: V, config: DebounceConfig, on_commit: impl FnMut(&V) + 'static) -> Self {
        Self::with_clock(initial, config, SystemClock, on_commit)
    }
}

impl<V, C: Clock> DebouncedInput<V, C> {
    /// Creates an input on a custom clock.
    pub fn with_clock(
        initial: V,
        config: DebounceConfig,
        clock: C,
        on_commit: impl FnMut(&V) + 'static,
    ) -> Self {
        Self {
            value: initial,
            timer: DebounceTimer::new(config.interval()),
            clock,
            on_commit: Box::new(on_commit),
        }
    }

    /// Records a keystroke: the pending value changes now and the commit is
    /// rescheduled.
    pub fn input(&mut self, value: V) {
        self.value = value;
        self.timer.arm(self.clock.now());
    }

    /// Fires the commit if the quiet period has elapsed.
    ///
    /// Returns `true` if `on_commit` ran.
    pub fn poll(&mut self) -> bool {
        if !self.timer.is_due(self.clock.now()) {
            return false;
        }
        self.commit();
        true
    }

    /// Fires a pending commit immediately, as on Enter.
    ///
    /// Returns `true` if `on_commit` ran.
    pub fn flush(&mut self) -> bool {
        if !self.timer.is_armed() {
            return false;
        }
        self.commit();
        true
    }

    /// Replaces the pending value from outside without committing it, and
    /// drops any scheduled commit.
    pub fn sync(&mut self, value: V) {
        self.value = value;
        self.timer.cancel();
    }

    /// Drops any scheduled commit.
    pub fn cancel(&mut self) {
        if self.timer.is_armed() {
            log::debug!("debounced commit cancelled");
        }
        self.timer.cancel();
    }

    /// Returns the pending value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns `true` if a commit is scheduled.
    pub fn is_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Returns the time left before the scheduled commit.
    pub fn remaining(&self) -> Option<Duration> {
        self.timer
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(self.clock.now()))
    }

    fn commit(&mut self) {
        self.timer.cancel();
        log::debug!("debounced commit fired");
        (self.on_commit)(&self.value);
    }
}

impl<V, C: Clock> Drop for DebouncedInput<V, C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<V: fmt::Debug, C: Clock> fmt::Debug for DebouncedInput<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncedInput")
            .field("value", &self.value)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

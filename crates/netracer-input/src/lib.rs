//! Pointer and keyboard input handling for the netracer connection table.
//!
//! Two small, host-driven state machines:
//!
//! - [`DebouncedInput`] delays filter commits until typing pauses.
//! - [`ExpandableCell`] toggles on a click but not on a drag.
//!
//! Neither owns a thread or a runtime timer. The host forwards events and
//! polls, so both behave the same under any UI toolkit and in tests.
//!
//! # Architecture
//!
//! ```text
//! keystroke ──input()──▶ DebouncedInput ──poll() after quiet period──▶ on_commit
//! pointer   ──down/up──▶ GestureTracker ──click?──▶ ExpandableCell::toggle
//! ```
//!
//! # Testing
//!
//! Time comes from a [`Clock`]. Tests use [`MockClock`] and advance it by hand:
//!
//! ```
//! use std::time::Duration;
//! use netracer_input::{Clock, MockClock};
//!
//! let clock = MockClock::new();
//! let start = clock.now();
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(clock.now() - start, Duration::from_millis(500));
//! ```

pub mod clock;
mod config;
mod debounce;
mod error;
mod gesture;

pub use clock::{Clock, MockClock, SystemClock};
pub use config::InputConfig;
pub use debounce::{DebounceConfig, DebounceTimer, DebouncedInput, DEFAULT_DEBOUNCE_MS};
pub use error::InputError;
pub use gesture::{
    CellState, ExpandableCell, GestureConfig, GestureState, GestureTracker, PointerEvent,
};

//! Click-versus-drag detection for expandable cells.
//!
//! Long address and port lists are shown in cells that start collapsed. A
//! click toggles the cell, but pressing and dragging to select text must
//! not, so a press only counts as a click when the pointer is released
//! quickly and close to where it went down.
//!
//! | Setting | Default | Click when |
//! |---------|---------|------------|
//! | `click_max_ms` | 200 | press lasted strictly less |
//! | `click_max_distance` | 5.0 px | pointer moved strictly less (Euclidean) |
//! | `truncate_height` | 200.0 px | collapsed content taller shows an ellipsis |

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Thresholds for click detection and truncation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Longest press that still counts as a click, exclusive, in milliseconds.
    pub click_max_ms: u64,
    /// Furthest pointer travel that still counts as a click, exclusive.
    pub click_max_distance: f64,
    /// Collapsed content taller than this is cut off with an ellipsis.
    pub truncate_height: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            click_max_ms: 200,
            click_max_distance: 5.0,
            truncate_height: 200.0,
        }
    }
}

impl GestureConfig {
    /// Returns the click duration limit.
    pub fn click_max_duration(&self) -> Duration {
        Duration::from_millis(self.click_max_ms)
    }

    /// Checks that distances are finite and not negative.
    pub fn validate(&self) -> Result<(), InputError> {
        if !(self.click_max_distance.is_finite() && self.click_max_distance >= 0.0) {
            return Err(InputError::invalid(
                "click_max_distance",
                "must be a finite, non-negative number",
            ));
        }
        if !(self.truncate_height.is_finite() && self.truncate_height >= 0.0) {
            return Err(InputError::invalid(
                "truncate_height",
                "must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

/// A pointer press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// When the event happened.
    pub at: Instant,
    /// Horizontal position in pixels.
    pub x: f64,
    /// Vertical position in pixels.
    pub y: f64,
}

impl PointerEvent {
    /// Creates an event at `(x, y)`.
    pub fn new(at: Instant, x: f64, y: f64) -> Self {
        Self { at, x, y }
    }

    /// Straight-line distance to another event.
    pub fn distance_to(&self, other: &PointerEvent) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

// ============================================================================
// Tracker
// ============================================================================

/// Where the tracker is between a press and a release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No press in progress.
    #[default]
    Idle,
    /// Pointer is down since this event.
    Pressed(PointerEvent),
}

/// Classifies press/release pairs as clicks.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    state: GestureState,
}

impl GestureTracker {
    /// Creates an idle tracker.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    /// Records a press. A second press replaces the first.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.state = GestureState::Pressed(event);
    }

    /// Records a release and returns `true` if the gesture was a click.
    ///
    /// A release without a recorded press is ignored.
    pub fn pointer_up(&mut self, event: PointerEvent) -> bool {
        let GestureState::Pressed(down) = std::mem::take(&mut self.state) else {
            return false;
        };
        let held = event.at.saturating_duration_since(down.at);
        let moved = down.distance_to(&event);
        let click =
            held < self.config.click_max_duration() && moved < self.config.click_max_distance;
        if click {
            log::debug!("click after {:?}, moved {:.1}px", held, moved);
        } else {
            log::debug!("drag after {:?}, moved {:.1}px", held, moved);
        }
        click
    }

    /// Returns the current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Returns the thresholds in use.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
}

// ============================================================================
// Cell
// ============================================================================

/// Whether an expandable cell shows all of its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Collapsed,
    Expanded,
}

/// A cell that expands and collapses on click, ignoring drags.
#[derive(Debug, Clone, Default)]
pub struct ExpandableCell {
    state: CellState,
    tracker: GestureTracker,
}

impl ExpandableCell {
    /// Creates a collapsed cell.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            state: CellState::Collapsed,
            tracker: GestureTracker::new(config),
        }
    }

    /// Feeds a press.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.tracker.pointer_down(event);
    }

    /// Feeds a release; toggles the cell and returns `true` on a click.
    pub fn pointer_up(&mut self, event: PointerEvent) -> bool {
        let click = self.tracker.pointer_up(event);
        if click {
            self.toggle();
        }
        click
    }

    /// Flips between collapsed and expanded.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            CellState::Collapsed => CellState::Expanded,
            CellState::Expanded => CellState::Collapsed,
        };
    }

    /// Returns whether the cell is collapsed or expanded.
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Returns `true` if the full content is shown.
    pub fn is_expanded(&self) -> bool {
        self.state == CellState::Expanded
    }

    /// Returns `true` if collapsed content of this height is cut off.
    pub fn shows_truncation(&self, content_height: f64) -> bool {
        self.state == CellState::Collapsed
            && content_height > self.tracker.config().truncate_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn short_still_press_is_a_click() {
        let t0 = Instant::now();
        let mut cell = ExpandableCell::default();
        cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
        assert!(cell.pointer_up(PointerEvent::new(at(t0, 150), 12.0, 11.0)));
        assert!(cell.is_expanded());
    }

    #[test]
    fn drag_does_not_toggle() {
        let t0 = Instant::now();
        let mut cell = ExpandableCell::default();
        cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
        assert!(!cell.pointer_up(PointerEvent::new(at(t0, 150), 50.0, 10.0)));
        assert_eq!(cell.state(), CellState::Collapsed);
    }

    #[test]
    fn long_press_does_not_toggle() {
        let t0 = Instant::now();
        let mut cell = ExpandableCell::default();
        cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
        assert!(!cell.pointer_up(PointerEvent::new(at(t0, 400), 11.0, 11.0)));
        assert_eq!(cell.state(), CellState::Collapsed);
    }

    #[test]
    fn thresholds_are_exclusive() {
        let t0 = Instant::now();
        let mut tracker = GestureTracker::default();
        tracker.pointer_down(PointerEvent::new(t0, 0.0, 0.0));
        assert!(!tracker.pointer_up(PointerEvent::new(at(t0, 200), 0.0, 0.0)));

        tracker.pointer_down(PointerEvent::new(t0, 0.0, 0.0));
        assert!(!tracker.pointer_up(PointerEvent::new(at(t0, 10), 3.0, 4.0)));

        tracker.pointer_down(PointerEvent::new(t0, 0.0, 0.0));
        assert!(tracker.pointer_up(PointerEvent::new(at(t0, 199), 3.0, 3.9)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut cell = ExpandableCell::default();
        assert!(!cell.pointer_up(PointerEvent::new(Instant::now(), 0.0, 0.0)));
        assert_eq!(cell.state(), CellState::Collapsed);
    }

    #[test]
    fn release_returns_tracker_to_idle() {
        let t0 = Instant::now();
        let mut tracker = GestureTracker::default();
        tracker.pointer_down(PointerEvent::new(t0, 1.0, 1.0));
        assert!(matches!(tracker.state(), GestureState::Pressed(_)));
        tracker.pointer_up(PointerEvent::new(at(t0, 50), 1.0, 1.0));
        assert_eq!(tracker.state(), GestureState::Idle);
        assert!(!tracker.pointer_up(PointerEvent::new(at(t0, 60), 1.0, 1.0)));
    }

    #[test]
    fn two_clicks_collapse_again() {
        let t0 = Instant::now();
        let mut cell = ExpandableCell::default();
        for start in [0, 1000] {
            cell.pointer_down(PointerEvent::new(at(t0, start), 5.0, 5.0));
            cell.pointer_up(PointerEvent::new(at(t0, start + 50), 5.0, 5.0));
        }
        assert_eq!(cell.state(), CellState::Collapsed);
    }

    #[test]
    fn truncation_only_when_collapsed_and_tall() {
        let mut cell = ExpandableCell::default();
        assert!(!cell.shows_truncation(200.0));
        assert!(cell.shows_truncation(200.5));
        cell.toggle();
        assert!(!cell.shows_truncation(1000.0));
    }

    #[test]
    fn config_validation() {
        assert!(GestureConfig::default().validate().is_ok());
        let bad = GestureConfig {
            click_max_distance: f64::NAN,
            ..GestureConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = GestureConfig {
            truncate_height: -1.0,
            ..GestureConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}

//! Integration tests for netracer-input.
//!
//! These drive the debounce and gesture machines the way a host event loop
//! would, with a mock clock so timing is exact.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use netracer_input::{
    Clock, DebounceConfig, DebouncedInput, ExpandableCell, InputConfig, MockClock, PointerEvent,
};
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn search_box(
    config: DebounceConfig,
    clock: &MockClock,
) -> (DebouncedInput<String, MockClock>, Rc<RefCell<Vec<String>>>) {
    let commits = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&commits);
    let input = DebouncedInput::with_clock(String::new(), config, clock.clone(), move |v: &String| {
        sink.borrow_mut().push(v.clone())
    });
    (input, commits)
}

// ============================================================================
// Debounce
// ============================================================================

#[test]
fn two_bursts_commit_twice() {
    let clock = MockClock::new();
    let (mut input, commits) = search_box(DebounceConfig::default(), &clock);

    for text in ["t", "tc", "tcp"] {
        input.input(text.into());
        clock.advance(ms(50));
        input.poll();
    }
    clock.advance(ms(500));
    input.poll();

    input.input("udp".into());
    clock.advance(ms(600));
    input.poll();

    assert_eq!(*commits.borrow(), vec!["tcp".to_string(), "udp".to_string()]);
}

#[test]
fn configured_interval_is_used() {
    let config = InputConfig::from_yaml("debounce:\n  interval_ms: 100\n").unwrap();
    let clock = MockClock::new();
    let (mut input, commits) = search_box(config.debounce, &clock);

    input.input("a".into());
    clock.advance(ms(100));
    assert!(input.poll());
    assert_eq!(commits.borrow().len(), 1);
}

#[test]
fn external_reset_between_keystrokes() {
    let clock = MockClock::new();
    let (mut input, commits) = search_box(DebounceConfig::default(), &clock);

    input.input("stale".into());
    input.sync(String::new());
    input.input("fresh".into());
    clock.advance(ms(500));
    assert!(input.poll());
    assert_eq!(*commits.borrow(), vec!["fresh".to_string()]);
}

// ============================================================================
// Gesture
// ============================================================================

#[test]
fn click_drag_and_long_press() {
    let clock = MockClock::new();
    let t0 = clock.now();
    let mut cell = ExpandableCell::default();

    cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
    assert!(cell.pointer_up(PointerEvent::new(t0 + ms(150), 12.0, 11.0)));
    assert!(cell.is_expanded());

    cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
    assert!(!cell.pointer_up(PointerEvent::new(t0 + ms(150), 50.0, 10.0)));
    assert!(cell.is_expanded());

    cell.pointer_down(PointerEvent::new(t0, 10.0, 10.0));
    assert!(!cell.pointer_up(PointerEvent::new(t0 + ms(400), 11.0, 11.0)));
    assert!(cell.is_expanded());
}

#[test]
fn truncation_follows_configured_height() {
    let config = InputConfig::from_json(r#"{"gesture": {"truncate_height": 50}}"#).unwrap();
    let cell = ExpandableCell::new(config.gesture);
    assert!(cell.shows_truncation(60.0));
    assert!(!cell.shows_truncation(50.0));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Keystrokes closer together than the interval commit once, with the
    /// last value.
    #[test]
    fn rapid_inputs_commit_once(
        values in prop::collection::vec("[a-z0-9.]{0,8}", 1..20),
        gap in 0u64..500,
    ) {
        let clock = MockClock::new();
        let (mut input, commits) = search_box(DebounceConfig::default(), &clock);

        for value in &values {
            input.input(value.clone());
            clock.advance(ms(gap));
            prop_assert!(!input.poll());
        }
        clock.advance(ms(500));
        prop_assert!(input.poll());

        prop_assert_eq!(commits.borrow().clone(), vec![values[values.len() - 1].clone()]);
    }

    /// A press/release pair toggles exactly when both thresholds hold.
    #[test]
    fn click_iff_fast_and_still(
        held in 0u64..400,
        dx in -10.0f64..10.0,
        dy in -10.0f64..10.0,
    ) {
        let clock = MockClock::new();
        let t0 = clock.now();
        let mut cell = ExpandableCell::default();

        let down = PointerEvent::new(t0, 100.0, 100.0);
        let up = PointerEvent::new(t0 + ms(held), 100.0 + dx, 100.0 + dy);
        cell.pointer_down(down);
        let click = cell.pointer_up(up);

        prop_assert_eq!(click, held < 200 && down.distance_to(&up) < 5.0);
        prop_assert_eq!(cell.is_expanded(), click);
    }
}

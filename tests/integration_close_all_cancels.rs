use std::time::{Duration, Instant};

use side_stack::stack::{PanelStack, StackConfig};

fn stack() -> PanelStack {
    PanelStack::with_width_sequence(StackConfig::default(), &[40, 48])
}

#[test]
fn close_all_tears_down_synchronously() {
    let now = Instant::now();
    let mut stack = stack();
    stack.open(now);
    stack.open(now);
    stack.open(now);

    stack.close_all();
    assert!(stack.is_empty());
    assert_eq!(stack.closing_count(), 0);
    assert_eq!(stack.backdrop_count(), 0);
    assert_eq!(stack.pending_timer_count(), 0);
}

#[test]
fn close_all_cancels_inflight_close_timers() {
    let now = Instant::now();
    let dur = StackConfig::default().animation_duration;
    let mut stack = stack();
    stack.open(now);
    let id = stack.open(now);

    // A close is mid-animation when everything is dismissed.
    stack.close(id, now);
    assert!(stack.pending_timer_count() > 0);
    stack.close_all();
    assert_eq!(stack.pending_timer_count(), 0);

    // Advancing simulated time far past every scheduled deadline must not
    // mutate anything: the stale timer was cancelled, not orphaned.
    let changed = stack.tick(now + dur * 10);
    assert!(!changed);
    assert!(stack.is_empty());
    assert_eq!(stack.backdrop_count(), 0);
}

#[test]
fn close_all_on_empty_stack_is_a_no_op() {
    let mut stack = stack();
    stack.close_all();
    assert!(stack.is_empty());
}

#[test]
fn reopening_after_close_all_starts_clean() {
    let now = Instant::now();
    let dur = StackConfig::default().animation_duration;
    let mut stack = stack();
    let a = stack.open(now);
    stack.close(a, now);
    stack.close_all();

    // New panel opened before the cancelled timer's old deadline: the fresh
    // id must survive the deadline passing.
    let later = now + Duration::from_millis(50);
    let b = stack.open(later);
    assert!(b > a, "ids are never reused");
    stack.tick(now + dur * 2);
    assert_eq!(stack.panel_ids(), vec![b]);
}

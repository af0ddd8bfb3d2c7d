use std::time::{Duration, Instant};

use side_stack::stack::{PanelStack, StackConfig};

fn stack() -> PanelStack {
    PanelStack::with_width_sequence(StackConfig::default(), &[40, 48, 56])
}

#[test]
fn three_panels_fill_the_three_slots() {
    let now = Instant::now();
    let mut stack = stack();
    stack.open(now);
    stack.open(now);
    stack.open(now);
    assert_eq!(stack.len(), 3);

    let views = stack.panel_views();
    assert_eq!(views.len(), 3);

    // index 0: bottom, index 1: lower, index 2: top (clean, interactive).
    assert!(views[0].is_bottom_panel && !views[0].is_lower_panel);
    assert!(views[1].is_lower_panel && !views[1].is_bottom_panel);
    assert!(!views[2].is_lower_panel && !views[2].is_bottom_panel);
    assert!(!views[2].is_inert);
    assert!(views[0].is_inert && views[1].is_inert);
}

#[test]
fn closing_the_top_promotes_the_slots_below() {
    let now = Instant::now();
    let mut stack = stack();
    let bottom = stack.open(now);
    stack.open(now);
    let top = stack.open(now);

    stack.close(top, now);

    // During the exit animation the lower panels carry the transitional
    // treatments: the former bottom promotes one slot up, the former lower
    // promotes to top treatment. Exactly one treatment each.
    let views = stack.panel_views();
    assert_eq!(views.len(), 3, "closing panel stays rendered");
    assert!(views[0].is_lower_panel && !views[0].is_bottom_panel);
    assert!(views[1].is_becoming_normal && !views[1].is_lower_panel);

    // After the delay the top is gone and the former bottom settles as the
    // plain lower panel.
    let settled = now + stack.config().animation_duration;
    stack.tick(settled);
    assert_eq!(stack.len(), 2);
    let views = stack.panel_views();
    assert_eq!(views[0].id, bottom);
    assert!(views[0].is_lower_panel);
    assert!(!views[0].is_bottom_panel);
}

#[test]
fn ids_stay_unique_across_churn() {
    let now = Instant::now();
    let dur = StackConfig::default().animation_duration;
    let mut stack = stack();
    let mut t = now;
    for round in 0..10 {
        stack.open(t);
        stack.open(t);
        stack.handle_escape(t);
        t += dur + Duration::from_millis(1);
        stack.tick(t);
        let mut ids = stack.panel_ids();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate id after round {round}");
    }
}

#[test]
fn entrance_animation_commits_over_two_frames() {
    let now = Instant::now();
    let mut stack = stack();
    stack.open(now);

    // Mounted immediately, but the open look lands only after two pumped
    // frames so the closed position gets painted first.
    assert!(!stack.panel_views()[0].is_open);
    assert!(stack.needs_frame());
    stack.on_frame();
    assert!(!stack.panel_views()[0].is_open);
    stack.on_frame();
    assert!(stack.panel_views()[0].is_open);
    assert!(!stack.needs_frame());
}

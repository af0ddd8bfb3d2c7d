//! Focus delegation across the panel stack.
//!
//! Focus follows the topmost non-closing panel, but only after its entrance
//! animation has settled: a pending handoff is armed when the top changes and
//! fires `animation_duration + margin` later. Any further stack change before
//! the deadline supersedes the pending handoff.

use std::time::{Duration, Instant};

use crate::stack::PanelId;

/// Where keyboard focus currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The main "open panel" trigger in the page chrome.
    OpenTrigger,
    /// The primary action control inside a panel.
    PanelAction(PanelId),
}

#[derive(Debug)]
pub struct FocusCoordinator {
    current: FocusTarget,
    pending: Option<(PanelId, Instant)>,
    last_top: Option<PanelId>,
    settle_delay: Duration,
}

impl FocusCoordinator {
    pub fn new(animation_duration: Duration, settle_margin: Duration) -> Self {
        Self {
            current: FocusTarget::OpenTrigger,
            pending: None,
            last_top: None,
            settle_delay: animation_duration + settle_margin,
        }
    }

    pub fn current(&self) -> FocusTarget {
        self.current
    }

    /// Observe the stack's topmost panel after a mutation. `top` is the last
    /// panel paired with its closing flag, or `None` for an empty stack.
    pub fn observe_top(&mut self, top: Option<(PanelId, bool)>, now: Instant) {
        match top {
            None => {
                self.pending = None;
                self.last_top = None;
                self.current = FocusTarget::OpenTrigger;
            }
            Some((panel_id, closing)) => {
                if closing {
                    // A closing top supersedes any pending handoff but does
                    // not receive focus itself.
                    if self.pending.is_some_and(|(id, _)| id == panel_id) {
                        self.pending = None;
                    }
                    self.last_top = Some(panel_id);
                    return;
                }
                if self.last_top != Some(panel_id) {
                    tracing::trace!(panel_id, "focus handoff armed");
                    self.pending = Some((panel_id, now + self.settle_delay));
                    self.last_top = Some(panel_id);
                }
            }
        }
    }

    /// Fire a due handoff. Returns the new target when focus moved.
    pub fn tick(&mut self, now: Instant) -> Option<FocusTarget> {
        let (panel_id, deadline) = self.pending?;
        if now < deadline {
            return None;
        }
        self.pending = None;
        self.current = FocusTarget::PanelAction(panel_id);
        tracing::debug!(panel_id, "focus moved to panel action");
        Some(self.current)
    }

    /// Immediate reset to the page trigger (close-all teardown).
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_top = None;
        self.current = FocusTarget::OpenTrigger;
    }
}

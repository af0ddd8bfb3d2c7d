//! Cancellable deferred-removal timers.
//!
//! Animated close works by keeping an element alive through its exit
//! transition and removing it only when a timer fires. This queue owns those
//! timers: at most one task per `(panel id, kind)` pair, all of them
//! cancellable, drained explicitly with [`RemovalQueue::take_due`] so the
//! owner controls exactly when removals commit. Nothing here reads the wall
//! clock; callers inject `now`, which keeps the whole engine deterministic
//! under test.

use std::time::Instant;

use crate::stack::PanelId;

/// What a fired task removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskKind {
    /// Remove the panel from the live collection and the closing set.
    RemovePanel,
    /// Remove the panel's backdrop record.
    RemoveBackdrop,
}

#[derive(Debug, Clone, Copy)]
pub struct Task {
    pub panel_id: PanelId,
    pub kind: TaskKind,
    pub deadline: Instant,
}

#[derive(Debug, Default)]
pub struct RemovalQueue {
    tasks: Vec<Task>,
}

impl RemovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` for `panel_id`. Rescheduling an already pending task
    /// replaces its deadline; there is never more than one task per key.
    pub fn schedule(&mut self, panel_id: PanelId, kind: TaskKind, deadline: Instant) {
        self.tasks
            .retain(|task| !(task.panel_id == panel_id && task.kind == kind));
        self.tasks.push(Task {
            panel_id,
            kind,
            deadline,
        });
    }

    pub fn is_scheduled(&self, panel_id: PanelId, kind: TaskKind) -> bool {
        self.tasks
            .iter()
            .any(|task| task.panel_id == panel_id && task.kind == kind)
    }

    pub fn cancel(&mut self, panel_id: PanelId, kind: TaskKind) {
        self.tasks
            .retain(|task| !(task.panel_id == panel_id && task.kind == kind));
    }

    /// Drop every pending task. Used by the synchronous close-all teardown so
    /// no stale timer can fire against already-cleared state.
    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Remove and return all tasks whose deadline has elapsed at `now`,
    /// ordered by deadline.
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let mut due: Vec<Task> = Vec::new();
        self.tasks.retain(|task| {
            if task.deadline <= now {
                due.push(*task);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| task.deadline);
        due
    }

    /// Earliest pending deadline, if any. Lets the event loop pick a wake-up
    /// bound instead of polling blindly.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.deadline).min()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn schedule_and_drain_in_deadline_order() {
        let base = Instant::now();
        let mut queue = RemovalQueue::new();
        queue.schedule(2, TaskKind::RemovePanel, base + Duration::from_millis(300));
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(100));

        assert!(queue.take_due(base).is_empty());

        let due = queue.take_due(base + Duration::from_millis(400));
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].panel_id, 1);
        assert_eq!(due[1].panel_id, 2);
        assert!(queue.is_empty());
    }

    #[test]
    fn reschedule_replaces_existing_task() {
        let base = Instant::now();
        let mut queue = RemovalQueue::new();
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(100));
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(500));
        assert_eq!(queue.len(), 1);
        assert!(queue.take_due(base + Duration::from_millis(200)).is_empty());
        assert_eq!(
            queue
                .take_due(base + Duration::from_millis(500))
                .first()
                .map(|t| t.panel_id),
            Some(1)
        );
    }

    #[test]
    fn kinds_are_independent_keys() {
        let base = Instant::now();
        let mut queue = RemovalQueue::new();
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(100));
        queue.schedule(1, TaskKind::RemoveBackdrop, base + Duration::from_millis(100));
        assert_eq!(queue.len(), 2);
        queue.cancel(1, TaskKind::RemovePanel);
        assert!(!queue.is_scheduled(1, TaskKind::RemovePanel));
        assert!(queue.is_scheduled(1, TaskKind::RemoveBackdrop));
    }

    #[test]
    fn cancel_all_leaves_nothing_to_fire() {
        let base = Instant::now();
        let mut queue = RemovalQueue::new();
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(100));
        queue.schedule(2, TaskKind::RemoveBackdrop, base + Duration::from_millis(100));
        queue.cancel_all();
        assert!(queue.take_due(base + Duration::from_secs(10)).is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn next_deadline_is_minimum() {
        let base = Instant::now();
        let mut queue = RemovalQueue::new();
        assert_eq!(queue.next_deadline(), None);
        queue.schedule(1, TaskKind::RemovePanel, base + Duration::from_millis(300));
        queue.schedule(2, TaskKind::RemovePanel, base + Duration::from_millis(150));
        assert_eq!(queue.next_deadline(), Some(base + Duration::from_millis(150)));
    }
}

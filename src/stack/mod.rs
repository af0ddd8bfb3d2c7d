//! The panel stack manager.
//!
//! Owns the ordered collection of live panels and the closing set, and is the
//! only writer of both. Every mutation runs one reconciliation pass that
//! refreshes the derived layers (presentation signals, backdrop records,
//! focus observation) before the next event can be processed, so the layers
//! can never interleave or drift.
//!
//! Time is injected: all entry points take `now`, and deferred removals fire
//! through [`PanelStack::tick`]. The only mutation paths are the four
//! user-triggered entry points: [`PanelStack::open`], [`PanelStack::close`],
//! [`PanelStack::close_all`] and [`PanelStack::handle_escape`].

pub mod slots;

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::backdrop::{BackdropMap, BackdropView};
use crate::constants::{
    DEFAULT_ANIMATION_DURATION, FOCUS_SETTLE_MARGIN, PANEL_WIDTHS, Z_BASE, Z_STEP,
};
use crate::focus::{FocusCoordinator, FocusTarget};
use crate::presentation::Presenter;
use crate::scheduler::{RemovalQueue, TaskKind};

/// Monotonic panel identifier; never reused within one stack.
pub type PanelId = u64;

/// Timing configuration consumed, not owned, by the engine.
#[derive(Debug, Clone, Copy)]
pub struct StackConfig {
    /// Governs every close, fade and removal timer.
    pub animation_duration: Duration,
    /// Added to the animation duration before focus handoff.
    pub focus_settle_margin: Duration,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            animation_duration: DEFAULT_ANIMATION_DURATION,
            focus_settle_margin: FOCUS_SETTLE_MARGIN,
        }
    }
}

/// Source of panel widths: uniform draw from the fixed set, or a scripted
/// sequence for deterministic tests and benchmarks.
#[derive(Debug)]
enum WidthSource {
    Random,
    Fixed { sequence: Vec<u16>, next: usize },
}

#[derive(Debug)]
struct WidthPicker {
    source: WidthSource,
}

impl WidthPicker {
    fn random() -> Self {
        Self {
            source: WidthSource::Random,
        }
    }

    fn fixed(sequence: &[u16]) -> Self {
        Self {
            source: WidthSource::Fixed {
                sequence: sequence.to_vec(),
                next: 0,
            },
        }
    }

    fn draw(&mut self) -> u16 {
        match &mut self.source {
            WidthSource::Random => PANEL_WIDTHS[rand::rng().random_range(0..PANEL_WIDTHS.len())],
            WidthSource::Fixed { sequence, next } => {
                let width = sequence[*next % sequence.len()];
                *next += 1;
                width
            }
        }
    }
}

#[derive(Debug)]
struct PanelRecord {
    id: PanelId,
    width: u16,
    presenter: Presenter,
}

/// Render-facing projection of one panel. The consumer renders these without
/// further stacking logic.
#[derive(Debug, Clone, Copy)]
pub struct PanelView {
    pub id: PanelId,
    pub width: u16,
    pub z_index: u16,
    /// Whether the settled "open" look (slid in) is applied this frame.
    pub is_open: bool,
    pub is_lower_panel: bool,
    pub is_bottom_panel: bool,
    pub is_becoming_normal: bool,
    pub is_inert: bool,
}

#[derive(Debug)]
pub struct PanelStack {
    config: StackConfig,
    panels: Vec<PanelRecord>,
    closing: BTreeSet<PanelId>,
    next_id: PanelId,
    backdrops: BackdropMap,
    timers: RemovalQueue,
    focus: FocusCoordinator,
    widths: WidthPicker,
}

impl PanelStack {
    pub fn new() -> Self {
        Self::with_config(StackConfig::default())
    }

    pub fn with_config(config: StackConfig) -> Self {
        Self {
            config,
            panels: Vec::new(),
            closing: BTreeSet::new(),
            next_id: 1,
            backdrops: BackdropMap::new(),
            timers: RemovalQueue::new(),
            focus: FocusCoordinator::new(config.animation_duration, config.focus_settle_margin),
            widths: WidthPicker::random(),
        }
    }

    /// Deterministic widths for tests and benchmarks: panels draw from
    /// `sequence`, cycling.
    pub fn with_width_sequence(config: StackConfig, sequence: &[u16]) -> Self {
        let mut stack = Self::with_config(config);
        stack.widths = WidthPicker::fixed(sequence);
        stack
    }

    pub fn config(&self) -> StackConfig {
        self.config
    }

    /// Open a new panel on top of the stack. Returns its id.
    pub fn open(&mut self, now: Instant) -> PanelId {
        let id = self.next_id;
        self.next_id += 1;
        let width = self.widths.draw();
        self.panels.push(PanelRecord {
            id,
            width,
            presenter: Presenter::opening(),
        });
        tracing::debug!(panel_id = id, width, "panel opened");
        self.reconcile(now);
        id
    }

    /// Begin the animated close of `panel_id`. Idempotent: closing an
    /// already-closing or unknown panel is a silent no-op. The panel leaves
    /// the collection only when its removal timer fires.
    pub fn close(&mut self, panel_id: PanelId, now: Instant) {
        if !self.panels.iter().any(|panel| panel.id == panel_id) {
            return;
        }
        if !self.closing.insert(panel_id) {
            return;
        }
        tracing::debug!(panel_id, "panel closing");
        self.timers.schedule(
            panel_id,
            TaskKind::RemovePanel,
            now + self.config.animation_duration,
        );
        self.reconcile(now);
    }

    /// Immediate teardown of everything: panels, closing set, backdrops and
    /// all pending timers. No animation; used for backdrop-click dismissal.
    pub fn close_all(&mut self) {
        if self.panels.is_empty() && self.backdrops.is_empty() && self.timers.is_empty() {
            return;
        }
        tracing::debug!(count = self.panels.len(), "closing all panels");
        self.panels.clear();
        self.closing.clear();
        self.backdrops.clear();
        self.timers.cancel_all();
        self.focus.reset();
    }

    /// Close exactly the topmost panel; no-op on an empty stack.
    pub fn handle_escape(&mut self, now: Instant) {
        if let Some(top) = self.panels.last() {
            let top_id = top.id;
            self.close(top_id, now);
        }
    }

    /// Fire due timers and the pending focus handoff. Returns true when any
    /// state changed (the caller should redraw).
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for task in self.timers.take_due(now) {
            match task.kind {
                TaskKind::RemovePanel => {
                    // Guard against stale timers: only act while the id is
                    // still marked closing.
                    if self.closing.remove(&task.panel_id) {
                        self.panels.retain(|panel| panel.id != task.panel_id);
                        tracing::debug!(panel_id = task.panel_id, "panel removed");
                        changed = true;
                    }
                }
                TaskKind::RemoveBackdrop => {
                    let pairs = self.pairs();
                    self.backdrops.finalize_removal(task.panel_id, &pairs);
                    changed = true;
                }
            }
        }
        if changed {
            self.reconcile(now);
        }
        for panel in &mut self.panels {
            panel.presenter.tick(now);
        }
        if self.focus.tick(now).is_some() {
            changed = true;
        }
        changed
    }

    /// Advance one rendered frame: entrance-animation commits and backdrop
    /// fade-ins. Returns true when another paint is needed.
    pub fn on_frame(&mut self) -> bool {
        let mut changed = false;
        for panel in &mut self.panels {
            if panel.presenter.on_frame() {
                changed = true;
            }
        }
        if self.backdrops.on_frame() {
            changed = true;
        }
        changed
    }

    pub fn needs_frame(&self) -> bool {
        self.panels.iter().any(|panel| panel.presenter.needs_frame())
            || self.backdrops.needs_frame()
    }

    /// Earliest pending timer deadline, for event-loop wake-up scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.panels.iter().map(|panel| panel.id).collect()
    }

    pub fn top_panel_id(&self) -> Option<PanelId> {
        self.panels.last().map(|panel| panel.id)
    }

    pub fn is_closing(&self, panel_id: PanelId) -> bool {
        self.closing.contains(&panel_id)
    }

    pub fn closing_count(&self) -> usize {
        self.closing.len()
    }

    pub fn backdrop_count(&self) -> usize {
        self.backdrops.len()
    }

    /// Number of pending deferred-removal timers (panels and backdrops).
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    pub fn focus_target(&self) -> FocusTarget {
        self.focus.current()
    }

    /// Per-panel view models for every depicted panel, in stacking order.
    pub fn panel_views(&self) -> Vec<PanelView> {
        let len = self.panels.len();
        let top_closing = self
            .panels
            .last()
            .is_some_and(|panel| self.closing.contains(&panel.id));
        self.panels
            .iter()
            .enumerate()
            .filter_map(|(index, panel)| {
                let closing = self.closing.contains(&panel.id);
                if !slots::is_visible(index, len, closing) {
                    return None;
                }
                let flags = slots::effective_flags(slots::classify(
                    index,
                    len,
                    closing,
                    top_closing,
                ));
                Some(PanelView {
                    id: panel.id,
                    width: panel.width,
                    z_index: Z_BASE + (index as u16 + 1) * Z_STEP,
                    is_open: panel.presenter.is_visually_open(),
                    is_lower_panel: flags.is_lower_panel,
                    is_bottom_panel: flags.is_bottom_panel,
                    is_becoming_normal: flags.is_becoming_normal,
                    is_inert: !(index + 1 == len && !closing),
                })
            })
            .collect()
    }

    /// Per-backdrop view models in ascending z order.
    pub fn backdrop_views(&self) -> Vec<BackdropView> {
        self.backdrops.views(&self.pairs())
    }

    fn pairs(&self) -> Vec<(PanelId, bool)> {
        self.panels
            .iter()
            .map(|panel| (panel.id, self.closing.contains(&panel.id)))
            .collect()
    }

    /// Single commit point for derived state after any mutation.
    fn reconcile(&mut self, now: Instant) {
        let len = self.panels.len();
        let duration = self.config.animation_duration;
        let closing = &self.closing;
        for (index, panel) in self.panels.iter_mut().enumerate() {
            let is_closing = closing.contains(&panel.id);
            let open = !is_closing && slots::is_visible(index, len, is_closing);
            panel.presenter.set_open(open, now, duration);
        }
        let pairs = self.pairs();
        self.backdrops
            .reconcile(&pairs, &mut self.timers, now, duration);
        self.focus.observe_top(pairs.last().copied(), now);
    }
}

impl Default for PanelStack {
    fn default() -> Self {
        Self::new()
    }
}

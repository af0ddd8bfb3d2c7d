//! Backdrop synchronization.
//!
//! One dimming record per panel in the visible window, kept consistent with
//! the panel collection by a single reconciliation pass on every mutation.
//! The records are purely derived state: the panel collection plus closing
//! set is authoritative, and [`BackdropMap::reconcile`] rebuilds targets from
//! it so the two layers can never drift apart.
//!
//! Opacity rules: the backdrop of the topmost non-closing panel converges to
//! 1, every other backdrop to 0. A freshly created top backdrop fades in over
//! two pumped frames so the transparent state gets painted first; a backdrop
//! promoted because the panel above it started closing snaps to 1
//! synchronously so the dimming layer never flickers during the handoff.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::constants::{Z_BASE, Z_STEP};
use crate::scheduler::{RemovalQueue, TaskKind};
use crate::stack::PanelId;
use crate::stack::slots::is_visible;

/// Frame-pump steps before a lazily created top backdrop flips to opaque.
const FADE_IN_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy)]
pub struct BackdropRecord {
    pub panel_id: PanelId,
    /// 1-based stack level of the owning panel; kept in sync on reconcile.
    pub level: usize,
    /// Settled values are exactly 0.0 or 1.0.
    pub opacity: f32,
    fade_in: u8,
}

/// Render-facing projection of one backdrop.
#[derive(Debug, Clone, Copy)]
pub struct BackdropView {
    pub panel_id: PanelId,
    pub opacity: f32,
    pub z_index: u16,
    pub is_inert: bool,
}

#[derive(Debug, Default)]
pub struct BackdropMap {
    records: BTreeMap<PanelId, BackdropRecord>,
}

impl BackdropMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild backdrop targets from the authoritative panel state.
    ///
    /// `panels` is the live collection in stacking order as `(id, closing)`
    /// pairs. Record removals are never performed here; fade-outs are
    /// scheduled on `timers` and committed later through
    /// [`BackdropMap::finalize_removal`].
    pub fn reconcile(
        &mut self,
        panels: &[(PanelId, bool)],
        timers: &mut RemovalQueue,
        now: Instant,
        animation_duration: Duration,
    ) {
        let len = panels.len();
        let top_closing = panels.last().is_some_and(|&(_, closing)| closing);
        let effective_top = effective_top(panels);

        // Lazily create records for every panel in the visible window and
        // refresh levels, which shift as panels below get removed.
        for (index, &(panel_id, closing)) in panels.iter().enumerate() {
            if !is_visible(index, len, closing) {
                continue;
            }
            let record = self.records.entry(panel_id).or_insert_with(|| {
                tracing::trace!(panel_id, level = index + 1, "backdrop record created");
                BackdropRecord {
                    panel_id,
                    level: index + 1,
                    opacity: 0.0,
                    fade_in: 0,
                }
            });
            record.level = index + 1;
        }

        for record in self.records.values_mut() {
            let position = panels.iter().position(|&(id, _)| id == record.panel_id);
            let state = position.map(|index| {
                let closing = panels[index].1;
                (closing, is_visible(index, len, closing))
            });

            match state {
                Some((false, true)) if Some(record.panel_id) == effective_top => {
                    // Target opacity 1. A pending removal is stale the moment
                    // this panel becomes the active top again.
                    timers.cancel(record.panel_id, TaskKind::RemoveBackdrop);
                    if record.opacity < 1.0 {
                        if top_closing {
                            // Promotion handoff: the old top is animating out,
                            // the new top's dimming must appear without a fade.
                            tracing::debug!(panel_id = record.panel_id, "backdrop promoted");
                            record.opacity = 1.0;
                            record.fade_in = 0;
                        } else if record.fade_in == 0 {
                            record.fade_in = FADE_IN_FRAMES;
                        }
                    }
                }
                Some((false, true)) => {
                    // Visible but buried under the top panel: target 0,
                    // record stays while the panel remains in the window.
                    timers.cancel(record.panel_id, TaskKind::RemoveBackdrop);
                    record.opacity = 0.0;
                    record.fade_in = 0;
                }
                _ => {
                    // Closing, evicted past the visible window, or already
                    // removed: fade out and retire the record after the
                    // shared delay.
                    record.opacity = 0.0;
                    record.fade_in = 0;
                    if !timers.is_scheduled(record.panel_id, TaskKind::RemoveBackdrop) {
                        tracing::trace!(panel_id = record.panel_id, "backdrop removal scheduled");
                        timers.schedule(
                            record.panel_id,
                            TaskKind::RemoveBackdrop,
                            now + animation_duration,
                        );
                    }
                }
            }
        }
    }

    /// Advance pending fade-ins one frame. Returns true when another paint is
    /// needed.
    pub fn on_frame(&mut self) -> bool {
        let mut changed = false;
        for record in self.records.values_mut() {
            match record.fade_in {
                0 => {}
                1 => {
                    record.fade_in = 0;
                    record.opacity = 1.0;
                    changed = true;
                }
                frames => {
                    record.fade_in = frames - 1;
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn needs_frame(&self) -> bool {
        self.records.values().any(|record| record.fade_in > 0)
    }

    /// Commit a fired `RemoveBackdrop` timer. Stale timers are no-ops: the
    /// record survives when its panel has meanwhile re-entered the visible
    /// window as a live panel.
    pub fn finalize_removal(&mut self, panel_id: PanelId, panels: &[(PanelId, bool)]) {
        let len = panels.len();
        let keep = panels
            .iter()
            .enumerate()
            .any(|(index, &(id, closing))| {
                id == panel_id && !closing && is_visible(index, len, closing)
            });
        if !keep && self.records.remove(&panel_id).is_some() {
            tracing::trace!(panel_id, "backdrop record removed");
        }
    }

    /// Immediate teardown for close-all; the caller cancels the timers.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn opacity_of(&self, panel_id: PanelId) -> Option<f32> {
        self.records.get(&panel_id).map(|record| record.opacity)
    }

    /// Views in ascending z order. A backdrop sits one z below its panel and
    /// is inert unless it belongs to the current topmost non-closing panel.
    pub fn views(&self, panels: &[(PanelId, bool)]) -> Vec<BackdropView> {
        let effective_top = effective_top(panels);
        let mut views: Vec<BackdropView> = self
            .records
            .values()
            .map(|record| BackdropView {
                panel_id: record.panel_id,
                opacity: record.opacity,
                z_index: Z_BASE + record.level as u16 * Z_STEP - 1,
                is_inert: Some(record.panel_id) != effective_top,
            })
            .collect();
        views.sort_by_key(|view| view.z_index);
        views
    }
}

/// The panel whose backdrop carries the dimming: last non-closing panel.
fn effective_top(panels: &[(PanelId, bool)]) -> Option<PanelId> {
    panels
        .iter()
        .rev()
        .find(|&&(_, closing)| !closing)
        .map(|&(id, _)| id)
}

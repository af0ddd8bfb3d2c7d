//! Shared crate-wide constants.

use std::time::Duration;

/// Default duration of every panel/backdrop open, close and fade transition.
///
/// This is the single external timing constant consumed by the engine: panel
/// removal timers, backdrop record removal timers and the presentation
/// machine's unmount delay all use the same value so the visual layers stay
/// in lockstep. The demo binary exposes it as `--duration-ms`.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Extra settle time added on top of the animation duration before focus is
/// handed to a newly topmost panel's primary action. Keeps the focus move
/// from landing mid-transition.
pub const FOCUS_SETTLE_MARGIN: Duration = Duration::from_millis(50);

/// Fixed discrete set of panel widths (terminal columns). A freshly opened
/// panel draws one of these uniformly at random; the width never changes for
/// the lifetime of the panel.
pub const PANEL_WIDTHS: [u16; 4] = [36, 44, 52, 60];

/// Base z-index under the lowest panel. Panel z = `Z_BASE + level * Z_STEP`
/// where `level` is the panel's 1-based position in the stack; each panel's
/// backdrop sits one below it.
pub const Z_BASE: u16 = 10;

/// Z-index gap between adjacent stack levels. Must be >= 2 so a backdrop
/// (panel z - 1) never collides with the panel below it.
pub const Z_STEP: u16 = 10;

/// Maximum number of simultaneously depicted stack slots. The slot
/// classification is only defined up to this depth; panels pushed beyond it
/// stay in the collection but are not rendered.
pub const MAX_DEPICTED: usize = 3;

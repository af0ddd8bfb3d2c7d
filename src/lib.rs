//! side-stack: an animated, stacked side-panel overlay engine for terminal
//! UIs.
//!
//! Up to three overlapping slide-in panels share a single dimming backdrop.
//! The engine owns the full open/close lifecycle: deferred animated
//! removal, visual slot classification (top/lower/bottom plus the
//! transitional promotions while the top panel animates out), backdrop
//! opacity synchronization, Escape dismissal and delayed focus handoff. It
//! exposes plain view models; rendering them is the consumer's job. All
//! timing is injected, so the whole engine is deterministic under test.

pub mod actions;
pub mod backdrop;
pub mod constants;
pub mod drivers;
pub mod event_loop;
pub mod focus;
pub mod keybindings;
pub mod presentation;
pub mod runner;
pub mod scheduler;
pub mod stack;
pub mod tracing_sub;
pub mod ui;

pub use backdrop::BackdropView;
pub use focus::FocusTarget;
pub use stack::{PanelId, PanelStack, PanelView, StackConfig};

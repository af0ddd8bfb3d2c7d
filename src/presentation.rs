//! Per-panel mount/unmount presentation machine.
//!
//! A panel is mounted the moment it opens, but its "open" visual class is
//! only applied two frames later so the initial off-screen position gets
//! painted before the slide-in transition starts. Closing reverses the class
//! immediately and keeps the panel mounted until the animation delay has
//! elapsed. Frames are advanced explicitly by the owner's frame pump.

use std::time::{Duration, Instant};

/// Number of frame-pump steps between mount and applying the open class.
/// Two steps guarantee a painted frame with the closed position in between.
const MOUNT_FRAMES: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unmounted,
    Mounting { frames_left: u8 },
    Steady,
    Unmounting { deadline: Instant },
}

#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    phase: Phase,
    open: bool,
}

impl Presenter {
    /// A presenter for a panel that is not yet rendered.
    pub fn new() -> Self {
        Self {
            phase: Phase::Unmounted,
            open: false,
        }
    }

    /// A presenter for a panel that opens immediately on creation.
    pub fn opening() -> Self {
        Self {
            phase: Phase::Mounting {
                frames_left: MOUNT_FRAMES,
            },
            open: true,
        }
    }

    /// Drive the open signal. Edge-triggered: repeating the current signal is
    /// a no-op, so reconciliation passes can call this freely. Opening resets
    /// the entrance animation deterministically; closing while mounted drops
    /// the open class and arms the unmount deadline.
    pub fn set_open(&mut self, open: bool, now: Instant, animation_duration: Duration) {
        if open == self.open {
            return;
        }
        self.open = open;
        if open {
            self.phase = Phase::Mounting {
                frames_left: MOUNT_FRAMES,
            };
        } else if !matches!(self.phase, Phase::Unmounted) {
            self.phase = Phase::Unmounting {
                deadline: now + animation_duration,
            };
        }
    }

    /// Advance one frame. Returns true when the visual state changed and
    /// another paint is needed.
    pub fn on_frame(&mut self) -> bool {
        match self.phase {
            Phase::Mounting { frames_left: 0 } | Phase::Mounting { frames_left: 1 } => {
                self.phase = Phase::Steady;
                true
            }
            Phase::Mounting { frames_left } => {
                self.phase = Phase::Mounting {
                    frames_left: frames_left - 1,
                };
                true
            }
            _ => false,
        }
    }

    /// Finalize a pending unmount once its deadline has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Phase::Unmounting { deadline } = self.phase
            && now >= deadline
        {
            self.phase = Phase::Unmounted;
        }
    }

    /// Whether the panel should be rendered at all.
    pub fn is_mounted(&self) -> bool {
        !matches!(self.phase, Phase::Unmounted)
    }

    /// Whether the open visual class is applied (the settled, slid-in look).
    pub fn is_visually_open(&self) -> bool {
        matches!(self.phase, Phase::Steady)
    }

    /// Whether the frame pump still has work for this presenter.
    pub fn needs_frame(&self) -> bool {
        matches!(self.phase, Phase::Mounting { .. })
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUR: Duration = Duration::from_millis(300);

    #[test]
    fn open_class_applies_after_two_frames() {
        let now = Instant::now();
        let mut p = Presenter::new();
        p.set_open(true, now, DUR);
        assert!(p.is_mounted());
        assert!(!p.is_visually_open());
        assert!(p.on_frame());
        assert!(!p.is_visually_open());
        assert!(p.on_frame());
        assert!(p.is_visually_open());
        assert!(!p.needs_frame());
    }

    #[test]
    fn close_drops_class_then_unmounts_after_delay() {
        let now = Instant::now();
        let mut p = Presenter::opening();
        p.on_frame();
        p.on_frame();
        assert!(p.is_visually_open());

        p.set_open(false, now, DUR);
        assert!(p.is_mounted());
        assert!(!p.is_visually_open());

        p.tick(now + DUR - Duration::from_millis(1));
        assert!(p.is_mounted());
        p.tick(now + DUR);
        assert!(!p.is_mounted());
    }

    #[test]
    fn rapid_reopen_restarts_entrance() {
        let now = Instant::now();
        let mut p = Presenter::opening();
        p.on_frame();
        p.on_frame();
        p.set_open(false, now, DUR);
        // Reopened before the unmount deadline: animation restarts from the
        // closed position, still mounted throughout.
        p.set_open(true, now + Duration::from_millis(10), DUR);
        assert!(p.is_mounted());
        assert!(!p.is_visually_open());
        p.tick(now + DUR * 2);
        assert!(p.is_mounted(), "reopen must cancel the pending unmount");
        p.on_frame();
        p.on_frame();
        assert!(p.is_visually_open());
    }

    #[test]
    fn closing_an_unmounted_presenter_is_a_no_op() {
        let now = Instant::now();
        let mut p = Presenter::new();
        p.set_open(false, now, DUR);
        assert!(!p.is_mounted());
        assert!(!p.needs_frame());
    }
}

//! Visual slot classification.
//!
//! Pure derivation of a panel's visual role from its position in the stack
//! and the closing state. Recomputed per render, never stored. The algorithm
//! is only defined up to a visible depth of [`MAX_DEPICTED`]; deeper panels
//! remain in the collection but are not depicted.

use crate::constants::MAX_DEPICTED;

/// Derived visual role of a panel.
///
/// `BecomingLower` and `BecomingNormal` are the transitional treatments that
/// apply while the topmost panel is animating out: the former bottom panel
/// promotes one slot up, and the former second panel promotes to top
/// treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Top,
    Lower,
    Bottom,
    BecomingLower,
    BecomingNormal,
    None,
}

/// Effective per-panel flags handed to rendering. The suppression rules are
/// folded in here so a panel shows exactly one transitional treatment at a
/// time: `becoming-normal` suppresses `lower`, `becoming-lower` suppresses
/// `bottom`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotFlags {
    pub is_lower_panel: bool,
    pub is_bottom_panel: bool,
    pub is_becoming_normal: bool,
}

/// How many trailing panels are depicted for a stack of `len` panels.
pub fn visible_count(len: usize) -> usize {
    if len >= MAX_DEPICTED { MAX_DEPICTED } else { 2 }
}

/// A panel is rendered when it sits inside the trailing visible window, or
/// when it is mid-close (closing panels stay rendered through their exit
/// animation regardless of position).
pub fn is_visible(index: usize, len: usize, closing: bool) -> bool {
    closing || index + visible_count(len) >= len
}

/// Classify the panel at `index` in a stack of `len` panels.
///
/// `closing` is whether this panel is in the closing set; `top_closing` is
/// whether the last panel of the stack is.
pub fn classify(index: usize, len: usize, closing: bool, top_closing: bool) -> SlotKind {
    if index >= len {
        return SlotKind::None;
    }
    if index + 1 == len {
        return SlotKind::Top;
    }
    if top_closing {
        // Promotion window while the top panel animates out.
        if index + 2 == len {
            return SlotKind::BecomingNormal;
        }
        if len >= MAX_DEPICTED && index + 3 == len {
            return SlotKind::BecomingLower;
        }
        return SlotKind::None;
    }
    if closing {
        return SlotKind::None;
    }
    if len >= MAX_DEPICTED && index + 3 == len {
        return SlotKind::Bottom;
    }
    if index + 2 == len {
        return SlotKind::Lower;
    }
    SlotKind::None
}

pub fn effective_flags(kind: SlotKind) -> SlotFlags {
    match kind {
        SlotKind::Lower | SlotKind::BecomingLower => SlotFlags {
            is_lower_panel: true,
            ..SlotFlags::default()
        },
        SlotKind::Bottom => SlotFlags {
            is_bottom_panel: true,
            ..SlotFlags::default()
        },
        SlotKind::BecomingNormal => SlotFlags {
            is_becoming_normal: true,
            ..SlotFlags::default()
        },
        SlotKind::Top | SlotKind::None => SlotFlags::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_panels_classify_bottom_lower_top() {
        assert_eq!(classify(0, 3, false, false), SlotKind::Bottom);
        assert_eq!(classify(1, 3, false, false), SlotKind::Lower);
        assert_eq!(classify(2, 3, false, false), SlotKind::Top);
    }

    #[test]
    fn two_panels_classify_lower_top() {
        assert_eq!(classify(0, 2, false, false), SlotKind::Lower);
        assert_eq!(classify(1, 2, false, false), SlotKind::Top);
    }

    #[test]
    fn single_panel_is_top() {
        assert_eq!(classify(0, 1, false, false), SlotKind::Top);
    }

    #[test]
    fn top_closing_promotes_lower_slots() {
        // Top panel animating out: index 1 promotes to top treatment,
        // index 0 promotes one slot up.
        assert_eq!(classify(1, 3, false, true), SlotKind::BecomingNormal);
        assert_eq!(classify(0, 3, false, true), SlotKind::BecomingLower);
        // With only two panels the first heads straight to normal.
        assert_eq!(classify(0, 2, false, true), SlotKind::BecomingNormal);
    }

    #[test]
    fn closing_non_top_panel_has_no_slot_treatment() {
        assert_eq!(classify(1, 3, true, false), SlotKind::None);
        assert_eq!(classify(0, 3, true, false), SlotKind::None);
    }

    #[test]
    fn four_panels_only_last_three_have_slots() {
        assert_eq!(classify(0, 4, false, false), SlotKind::None);
        assert_eq!(classify(1, 4, false, false), SlotKind::Bottom);
        assert_eq!(classify(2, 4, false, false), SlotKind::Lower);
        assert_eq!(classify(3, 4, false, false), SlotKind::Top);
    }

    #[test]
    fn visibility_window_is_two_then_three() {
        assert_eq!(visible_count(1), 2);
        assert_eq!(visible_count(2), 2);
        assert_eq!(visible_count(3), 3);
        assert_eq!(visible_count(7), 3);

        assert!(is_visible(0, 2, false));
        assert!(!is_visible(0, 4, false));
        assert!(is_visible(1, 4, false));
        // Closing panels stay rendered even outside the window.
        assert!(is_visible(0, 4, true));
    }

    #[test]
    fn effective_flags_suppress_double_treatment() {
        let becoming_lower = effective_flags(SlotKind::BecomingLower);
        assert!(becoming_lower.is_lower_panel);
        assert!(!becoming_lower.is_bottom_panel);

        let becoming_normal = effective_flags(SlotKind::BecomingNormal);
        assert!(becoming_normal.is_becoming_normal);
        assert!(!becoming_normal.is_lower_panel);

        assert_eq!(effective_flags(SlotKind::Top), SlotFlags::default());
    }
}

//! Terminal rendering of the stack's view models.
//!
//! Everything here is a dumb projection: which panels exist, their slot
//! treatment, opacity and z order all arrive precomputed in the view models.
//! The renderer maps them onto terminal geometry (right-anchored overlay
//! rects, left offset and shrink for the lower/bottom slots, a DIM overlay
//! for backdrop opacity) and reports the hit regions the mouse path needs.

use indoc::indoc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::focus::FocusTarget;
use crate::stack::{PanelStack, PanelView};

/// Horizontal inset applied per buried slot so the stack reads as layered.
const SLOT_SHIFT: u16 = 4;

/// Mouse hit regions registered during the last render.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitRegions {
    /// The main "open panel" trigger in the page chrome.
    pub trigger: Rect,
    /// Body of the topmost rendered panel; clicks inside never dismiss.
    pub top_panel: Option<Rect>,
    /// Whether a click outside the top panel lands on an active backdrop
    /// and should dismiss the whole stack.
    pub backdrop_active: bool,
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

pub fn render(frame: &mut Frame, stack: &PanelStack) -> HitRegions {
    let area = frame.area();
    let focus = stack.focus_target();
    let mut hits = HitRegions::default();

    render_page_chrome(frame, area, focus, &mut hits);

    let backdrops = stack.backdrop_views();
    hits.backdrop_active = backdrops
        .iter()
        .any(|view| !view.is_inert && view.opacity > 0.0);
    if backdrops.iter().any(|view| view.opacity > 0.0) {
        frame
            .buffer_mut()
            .set_style(area, Style::new().add_modifier(Modifier::DIM));
    }

    // Panel views arrive in ascending z order; painting in order stacks them.
    let views = stack.panel_views();
    for view in &views {
        let rect = panel_rect(view, area);
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        render_panel(frame, view, rect, focus);
        hits.top_panel = Some(rect);
    }

    hits
}

fn render_page_chrome(frame: &mut Frame, area: Rect, focus: FocusTarget, hits: &mut HitRegions) {
    let text = indoc! {"
        side-stack demo

        O / Enter  open panel        Esc  close top panel
        X          close focused     D    dismiss all
        Ctrl+Q     quit              click backdrop to dismiss
    "};
    frame.render_widget(Paragraph::new(text), area);

    let label = "[ Open panel (o) ]";
    let trigger = Rect::new(
        area.x,
        (area.y + 6).min(area.height.saturating_sub(1)),
        (label.len() as u16).min(area.width),
        1,
    );
    let style = if focus == FocusTarget::OpenTrigger {
        Style::new().add_modifier(Modifier::REVERSED)
    } else {
        Style::new()
    };
    frame.render_widget(Paragraph::new(Span::styled(label, style)), trigger);
    hits.trigger = trigger;
}

/// Map a panel view to its overlay rect. Lower/bottom slots shift left and
/// shrink to suggest depth; panels without the open class show only a sliver
/// at the right edge (sliding in or out).
fn panel_rect(view: &PanelView, area: Rect) -> Rect {
    let width = view.width.min(area.width);
    let (shift_left, shrink) = if view.is_bottom_panel {
        (2 * SLOT_SHIFT, 2)
    } else if view.is_lower_panel {
        (SLOT_SHIFT, 1)
    } else {
        (0, 0)
    };
    let visible_width = if view.is_open {
        width
    } else {
        (width / 4).max(1)
    };
    let x = area
        .width
        .saturating_sub(visible_width)
        .saturating_sub(shift_left);
    let y = area.y + 1 + shrink;
    let height = area.height.saturating_sub(2 + 2 * shrink);
    Rect::new(x, y, visible_width.min(area.width.saturating_sub(x)), height)
}

fn render_panel(frame: &mut Frame, view: &PanelView, rect: Rect, focus: FocusTarget) {
    frame.render_widget(Clear, rect);

    let mut block_style = Style::new();
    if view.is_inert {
        block_style = block_style.add_modifier(Modifier::DIM);
    }
    let block = Block::new()
        .borders(Borders::ALL)
        .title(format!(" Panel {} ", view.id))
        .style(block_style);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let action_focused = focus == FocusTarget::PanelAction(view.id);
    let action_style = if action_focused && !view.is_inert {
        Style::new().add_modifier(Modifier::REVERSED)
    } else {
        Style::new()
    };
    let lines = vec![
        Line::from(Span::styled("[ Open another panel (o) ]", action_style)),
        Line::from(""),
        Line::from("x close · esc close top · d dismiss all"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

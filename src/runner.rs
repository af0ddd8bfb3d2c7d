//! Wires the engine, input and renderer into a running demo app.

use std::io;
use std::time::Instant;

use crossterm::event::{Event, KeyEventKind, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use thiserror::Error;

use crate::actions::Action;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::KeyBindings;
use crate::stack::{PanelStack, StackConfig};
use crate::ui::{self, HitRegions};

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("terminal i/o failure: {0}")]
    Io(#[from] io::Error),
}

/// Demo application state: the engine plus the input-side glue.
pub struct StackApp {
    pub stack: PanelStack,
    bindings: KeyBindings,
    hits: HitRegions,
}

impl StackApp {
    pub fn new(config: StackConfig) -> Self {
        Self {
            stack: PanelStack::with_config(config),
            bindings: KeyBindings::default(),
            hits: HitRegions::default(),
        }
    }

    /// Route a key or mouse event to the engine. Returns false for `Quit`.
    pub fn dispatch(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match self.bindings.action_for_key(key) {
                    Some(Action::Quit) => return false,
                    Some(Action::OpenPanel) => {
                        self.stack.open(now);
                    }
                    Some(Action::CloseTopPanel) => self.stack.handle_escape(now),
                    Some(Action::CloseFocusedPanel) => {
                        if let crate::focus::FocusTarget::PanelAction(id) =
                            self.stack.focus_target()
                        {
                            self.stack.close(id, now);
                        }
                    }
                    Some(Action::CloseAllPanels) => self.stack.close_all(),
                    None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return;
        }
        if ui::contains(self.hits.trigger, mouse.column, mouse.row) {
            self.stack.open(now);
            return;
        }
        // Clicks inside the top panel stay there; anywhere else over an
        // active backdrop dismisses the whole stack.
        if self
            .hits
            .top_panel
            .is_some_and(|rect| ui::contains(rect, mouse.column, mouse.row))
        {
            return;
        }
        if self.hits.backdrop_active {
            self.stack.close_all();
        }
    }
}

/// Run the demo until quit. The idle branch of the event loop advances the
/// removal timers; every draw advances the frame pump, which is what commits
/// two-phase entrance animations and backdrop fades.
pub fn run_stack_app<B, D>(
    terminal: &mut Terminal<B>,
    driver: D,
    app: &mut StackApp,
    poll_interval: std::time::Duration,
) -> Result<(), RunnerError>
where
    B: Backend<Error = io::Error>,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|_driver, event| {
        let now = Instant::now();
        match event {
            Some(event) => {
                if !app.dispatch(&event, now) {
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                app.stack.tick(now);
            }
        }

        terminal.draw(|frame| {
            app.hits = ui::render(frame, &app.stack);
        })?;
        app.stack.on_frame();
        Ok(ControlFlow::Continue)
    })
}

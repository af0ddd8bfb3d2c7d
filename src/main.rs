use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::DisableMouseCapture;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use side_stack::constants::{DEFAULT_ANIMATION_DURATION, FOCUS_SETTLE_MARGIN};
use side_stack::drivers::{ConsoleDriver, InputDriver};
use side_stack::runner::{RunnerError, StackApp, run_stack_app};
use side_stack::stack::StackConfig;

#[derive(Debug, Parser)]
#[command(name = "side-stack", about = "Animated side-panel stack demo")]
struct Args {
    /// Animation duration in milliseconds for every open/close/fade
    /// transition.
    #[arg(long, default_value_t = DEFAULT_ANIMATION_DURATION.as_millis() as u64)]
    duration_ms: u64,

    /// Input poll interval in milliseconds (frame cadence).
    #[arg(long, default_value_t = 16)]
    poll_ms: u64,
}

fn main() -> Result<(), RunnerError> {
    let args = Args::parse();
    side_stack::tracing_sub::init_default();

    let config = StackConfig {
        animation_duration: Duration::from_millis(args.duration_ms),
        focus_settle_margin: FOCUS_SETTLE_MARGIN,
    };
    let mut app = StackApp::new(config);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleDriver::new();
    driver.set_mouse_capture(true)?;

    let result = run_stack_app(
        &mut terminal,
        &mut driver,
        &mut app,
        Duration::from_millis(args.poll_ms),
    );

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

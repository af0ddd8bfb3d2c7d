use std::fs::File;
use std::sync::Mutex;

use tracing::Level;

/// Initialize the tracing subscriber for the demo binary.
///
/// The terminal runs in raw mode, so stderr output would corrupt the screen;
/// lifecycle traces are written to the file named by `SIDE_STACK_LOG` when
/// that variable is set, and dropped otherwise. Safe to call multiple times;
/// subsequent calls are no-ops for the global subscriber.
pub fn init_default() {
    let Ok(path) = std::env::var("SIDE_STACK_LOG") else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

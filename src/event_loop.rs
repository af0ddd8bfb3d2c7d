use std::io;
use std::time::Duration;

use crossterm::event::Event;

use crate::drivers::InputDriver;

pub enum ControlFlow {
    Continue,
    Quit,
}

/// A centralized event loop that drives the main UI thread.
///
/// The loop is the only place that polls or reads input. The handler is
/// called with `Some(event)` for input and `None` when the poll interval
/// elapses idle; idle calls are what advance deferred-removal timers and the
/// frame pump, so animations progress without any input arriving.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run until the handler returns [`ControlFlow::Quit`] or errors.
    pub fn run<F, E>(&mut self, mut handler: F) -> Result<(), E>
    where
        F: FnMut(&mut D, Option<Event>) -> Result<ControlFlow, E>,
        E: From<io::Error>,
    {
        loop {
            if let ControlFlow::Quit = handler(&mut self.driver, None)? {
                break;
            }

            if self.driver.poll(self.poll_interval).map_err(E::from)? {
                // Drain the queue so a burst (key repeat, mouse drag) doesn't
                // interleave one stale render per buffered event.
                loop {
                    let event = self.driver.read().map_err(E::from)?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0)).map_err(E::from)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

pub mod console;
pub mod input_driver;

pub use console::ConsoleDriver;
pub use input_driver::InputDriver;

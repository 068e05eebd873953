//! Terminal and UI backing for interactive sessions

pub mod console;
pub mod process_terminal;

pub use console::ConsoleHost;
pub use process_terminal::{ProcessTerminal, ProcessTerminalFactory};

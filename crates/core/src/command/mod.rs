//! Dev mode command line generation

pub mod dev_command;
pub mod shell;
pub mod wrapper;

// Re-export commonly used types
pub use dev_command::{DevCommand, DevGoal, Executable, RUN_TESTS_INPUT, STOP_INPUT};
pub use shell::ShellKind;
pub use wrapper::find_wrapper;

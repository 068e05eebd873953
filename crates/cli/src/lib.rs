pub mod cli;
pub mod commands;
pub mod display;
pub mod events;
pub mod host;
pub mod watch;
pub mod workspace;

// Re-export commonly used items
pub use cli::{Cli, Commands};

//! Seams to the environment commands run in.
//!
//! The dispatcher never touches a terminal or a UI directly. A CLI session
//! backs these traits with child processes and stdin/stdout, tests back
//! them with recorders.

use crate::dispatch::custom_params::{FlowInput, FlowState};
use crate::error::Result;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub u64);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terminal-{}", self.0)
    }
}

/// What a new terminal should look like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSpec {
    pub name: String,
    pub cwd: PathBuf,
    pub env: Vec<(String, String)>,
}

/// An interactive shell bound to one project
pub trait Terminal {
    fn id(&self) -> TerminalId;

    /// Bring the terminal to the user's attention
    fn show(&mut self);

    /// Type a line of text, followed by Enter
    fn send_text(&mut self, text: &str) -> Result<()>;
}

pub trait TerminalFactory {
    fn create(&mut self, spec: TerminalSpec) -> Result<Box<dyn Terminal>>;
}

/// User-facing side effects of commands
pub trait Host {
    fn info(&mut self, message: &str);

    fn warn(&mut self, message: &str);

    /// Ask the user for the next step of the custom parameter flow
    fn prompt(&mut self, state: &FlowState, recent: &[String]) -> FlowInput;

    fn show_report(&mut self, title: &str, path: &Path, html: &str);

    fn open_file(&mut self, path: &Path);
}

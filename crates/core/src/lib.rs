//! liberty-dev - Discover Liberty dev mode projects and drive them
//!
//! This crate provides functionality to:
//! - Classify Maven and Gradle build files as dev mode projects
//! - Keep a registry of projects in step with the workspace
//! - Turn start, stop and test commands into terminal input
pub mod cache;
pub mod command;
pub mod config;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod gradle;
pub mod host;
pub mod maven;
pub mod registry;
pub mod report;
pub mod state;
pub mod types;
pub mod version;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

pub use command::{DevCommand, DevGoal, ShellKind};
pub use config::Config;
pub use discovery::{DiscoveredProject, Discovery};
pub use dispatch::{DevAction, DispatchContext, Dispatcher, Outcome};
pub use host::{Host, Terminal, TerminalFactory, TerminalId, TerminalSpec};
pub use registry::{EntityId, ProjectEntity, Registry};
pub use report::ReportKind;

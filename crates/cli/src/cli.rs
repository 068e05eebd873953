use anyhow::Result;
use clap::{Parser, Subcommand};
use liberty_dev_core::{DevAction, ReportKind};
use std::path::PathBuf;

use crate::commands::{
    add_command, command_command, init_command, list_command, remove_command, report_command,
    session_command,
};

#[derive(Parser, Debug)]
#[command(name = "liberty-dev")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    /// Workspace root to search for projects (repeatable, defaults to the current directory)
    #[arg(short, long = "workspace", global = true)]
    pub workspaces: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the dev mode projects in the workspace
    #[command(visible_alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the text a command would type into the project's terminal
    Command {
        /// Project label, build file or project directory
        project: String,

        /// start, start-container, custom-start, stop or run-tests
        action: DevAction,

        /// Extra parameters for custom-start, e.g. "-DhotTests=true"
        #[arg(short, long, allow_hyphen_values = true)]
        params: Option<String>,
    },
    /// Show where a project's test report is, and whether it exists
    Report {
        /// Project label, build file or project directory
        project: String,

        /// failsafe, surefire or gradle
        kind: ReportKind,
    },
    /// Add a build file that discovery does not find
    Add { build_file: PathBuf },
    /// Remove a build file added with `add`
    Remove { build_file: PathBuf },
    /// Write a default .liberty-dev.json into the first workspace root
    Init {
        /// Overwrite an existing configuration
        #[arg(short, long)]
        force: bool,
    },
    /// Interactive dashboard that runs dev mode in child shells
    #[command(visible_alias = "s")]
    Session,
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let workspaces = self.workspaces;
        match self.command {
            Commands::List { json } => list_command(&workspaces, json),
            Commands::Command {
                project,
                action,
                params,
            } => command_command(&workspaces, &project, action, params.as_deref()),
            Commands::Report { project, kind } => report_command(&workspaces, &project, kind),
            Commands::Add { build_file } => add_command(&workspaces, &build_file),
            Commands::Remove { build_file } => remove_command(&workspaces, &build_file),
            Commands::Init { force } => init_command(&workspaces, force),
            Commands::Session => session_command(&workspaces),
        }
    }
}

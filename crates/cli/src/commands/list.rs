use anyhow::Result;
use std::path::PathBuf;

use crate::display::{print_projects, projects_json};
use crate::workspace::open_registry;

pub fn list_command(workspaces: &[PathBuf], json: bool) -> Result<()> {
    let registry = open_registry(workspaces)?;
    let projects = registry.projects();

    if json {
        println!("{}", serde_json::to_string_pretty(&projects_json(&projects))?);
    } else {
        print_projects(&projects);
    }
    Ok(())
}

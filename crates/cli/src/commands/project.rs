use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::workspace::open_registry;

pub fn add_command(workspaces: &[PathBuf], build_file: &Path) -> Result<()> {
    let mut registry = open_registry(workspaces)?;
    let path = registry.add_project(build_file)?;

    match registry.get(&path) {
        Some(entity) => println!("✅ Added {} ({})", entity.label, path.display()),
        None => println!("✅ Added {}", path.display()),
    }
    Ok(())
}

pub fn remove_command(workspaces: &[PathBuf], build_file: &Path) -> Result<()> {
    let mut registry = open_registry(workspaces)?;

    if registry.remove_project(build_file)? {
        println!("✅ Removed {}", build_file.display());
    } else {
        println!(
            "❌ {} was not added by hand; discovered projects cannot be removed",
            build_file.display()
        );
    }
    Ok(())
}

use anyhow::{Context, Result};
use liberty_dev_core::Config;
use liberty_dev_core::config::CONFIG_FILE_NAME;
use std::path::PathBuf;
use tracing::info;

use crate::workspace::workspace_roots;

pub fn init_command(workspaces: &[PathBuf], force: bool) -> Result<()> {
    let roots = workspace_roots(workspaces)?;
    let config_path = roots[0].join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    info!("Wrote default configuration");

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}

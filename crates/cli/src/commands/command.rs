use anyhow::{Result, bail};
use liberty_dev_core::{DevAction, DispatchContext};
use std::path::PathBuf;
use tracing::debug;

use crate::workspace::{open_registry, resolve_project};

/// Print the line an action would type, without running anything
pub fn command_command(
    workspaces: &[PathBuf],
    project: &str,
    action: DevAction,
    params: Option<&str>,
) -> Result<()> {
    let registry = open_registry(workspaces)?;
    let entity = resolve_project(&registry, project)?;
    let context = DispatchContext::new(registry.config().clone());
    debug!("Building {} for {} in {:?}", action, entity.label, context.shell);

    if action == DevAction::CustomStart {
        match params.map(str::trim) {
            Some(p) if p.starts_with('-') => {}
            Some(_) => bail!("Parameters must start with '-'"),
            None => bail!("custom-start needs --params"),
        }
    }

    let Some(line) = context.command_line(entity, action, params) else {
        bail!(
            "{} does not support dev mode in a container",
            entity.label
        );
    };

    println!("{line}");
    Ok(())
}

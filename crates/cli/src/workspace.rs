use anyhow::{Context, Result, bail};
use liberty_dev_core::state::DashboardState;
use liberty_dev_core::{Config, ProjectEntity, Registry};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Canonical workspace roots, defaulting to the current directory
pub fn workspace_roots(workspaces: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let requested = if workspaces.is_empty() {
        vec![env::current_dir().context("Failed to get current directory")?]
    } else {
        workspaces.to_vec()
    };

    requested
        .iter()
        .map(|root| {
            root.canonicalize()
                .with_context(|| format!("Workspace {} does not exist", root.display()))
        })
        .collect()
}

/// Registry over the workspace roots, configured from the first root and
/// already populated by a discovery pass.
pub fn open_registry(workspaces: &[PathBuf]) -> Result<Registry> {
    let roots = workspace_roots(workspaces)?;
    let primary = roots[0].clone();

    let config = Config::load(&primary)
        .with_context(|| format!("Failed to load configuration for {}", primary.display()))?;
    let state_file = DashboardState::state_file(&primary);
    debug!("Using state file {}", state_file.display());

    let mut registry = Registry::new(roots, config).with_state_file(state_file)?;
    registry.refresh();
    Ok(registry)
}

/// Find a project by label, build file or directory
pub fn resolve_project<'a>(registry: &'a Registry, query: &str) -> Result<&'a ProjectEntity> {
    if let Some(entity) = registry.find(query) {
        return Ok(entity);
    }

    let canonical = Path::new(query).canonicalize().ok();
    if let Some(entity) = canonical
        .as_ref()
        .and_then(|path| registry.find(&path.to_string_lossy()))
    {
        return Ok(entity);
    }

    bail!("No project matches '{query}'. Run `liberty-dev list` to see the known projects.")
}

use anyhow::{Context, Result};
use liberty_dev_core::Config;
use liberty_dev_core::discovery::scan::is_tracked_build_file;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use tracing::{debug, trace, warn};

use crate::events::SessionEvent;

/// Watch the roots and report changes to build files. Files under the
/// configured excluded directories (build output, VCS metadata) are
/// ignored. The watcher stops when the returned value is dropped.
pub fn watch_build_files(
    roots: &[PathBuf],
    config: &Config,
    events: Sender<SessionEvent>,
) -> Result<RecommendedWatcher> {
    let watched = roots.to_vec();
    let config = config.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_build_change(&event, &watched, &config) => {
            debug!("Build file change: {:?}", event.paths);
            let _ = events.send(SessionEvent::BuildFilesChanged);
        }
        Ok(_) => {}
        Err(e) => warn!("File watch error: {}", e),
    })
    .context("Failed to create file watcher")?;

    for root in roots {
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}", root.display()))?;
    }
    Ok(watcher)
}

fn is_build_change(event: &Event, roots: &[PathBuf], config: &Config) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| is_tracked_build_file(path) && !in_excluded_dir(path, roots, config))
}

/// Whether a directory between the watched root and `path` is excluded
fn in_excluded_dir(path: &Path, roots: &[PathBuf], config: &Config) -> bool {
    let relative = roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .unwrap_or(path);
    let excluded = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .any(|component| match component {
            Component::Normal(name) => name.to_str().is_some_and(|n| config.is_excluded(n)),
            _ => false,
        });
    if excluded {
        trace!("Ignoring change to {}", path.display());
    }
    excluded
}

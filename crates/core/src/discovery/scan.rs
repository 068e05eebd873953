use crate::gradle::classifier::SETTINGS_FILE;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::{DirEntry, WalkDir};

pub const POM_FILE: &str = "pom.xml";
pub const GRADLE_BUILD_FILE: &str = "build.gradle";

/// Build files found under the workspace roots, in path order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    pub poms: Vec<PathBuf>,
    pub gradle_builds: Vec<PathBuf>,
}

/// Collect every `pom.xml` and `build.gradle` below the roots, skipping
/// directories whose name is in `exclude_dirs`.
pub fn find_build_files(roots: &[PathBuf], exclude_dirs: &[String]) -> Candidates {
    let mut candidates = Candidates::default();

    for root in roots {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, exclude_dirs));

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(POM_FILE) => candidates.poms.push(entry.into_path()),
                Some(GRADLE_BUILD_FILE) => candidates.gradle_builds.push(entry.into_path()),
                _ => {}
            }
        }
    }

    candidates.poms.sort();
    candidates.poms.dedup();
    candidates.gradle_builds.sort();
    candidates.gradle_builds.dedup();
    trace!(
        "Found {} pom.xml and {} build.gradle files",
        candidates.poms.len(),
        candidates.gradle_builds.len()
    );
    candidates
}

/// File names whose change can alter what discovery finds
pub fn is_tracked_build_file(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(POM_FILE | GRADLE_BUILD_FILE | SETTINGS_FILE | "server.xml")
    )
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|excluded| excluded == name))
}

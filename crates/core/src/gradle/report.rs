//! Locating the HTML test report of a Gradle project

use super::script::GradleScript;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Report location when the build does not configure one
pub const DEFAULT_TEST_REPORT: &str = "build/reports/tests/test/index.html";

/// Text every Gradle HTML test report page carries
pub const TEST_REPORT_MARKER: &str = "Test Summary";

const REPORT_FILE: &str = "index.html";

/// Resolve the test report for a build file.
///
/// Order: the destination configured in the build script, the default
/// location under the project directory, then the most recently modified
/// `index.html` under `search_roots` that looks like a Gradle test report.
/// Falls back to the default location, which may not exist.
pub fn resolve_test_report(build_file: &Path, search_roots: &[PathBuf]) -> PathBuf {
    let project_dir = build_file.parent().unwrap_or(Path::new("."));
    let default = project_dir.join(DEFAULT_TEST_REPORT);

    if let Some(configured) = configured_report(build_file, project_dir) {
        if configured.is_file() {
            return configured;
        }
        debug!("Configured test report {} does not exist", configured.display());
    }

    if default.is_file() {
        return default;
    }

    search_roots
        .iter()
        .filter_map(|root| newest_report_under(root))
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, path)| path)
        .unwrap_or(default)
}

fn configured_report(build_file: &Path, project_dir: &Path) -> Option<PathBuf> {
    let source = fs::read_to_string(build_file).ok()?;
    let destination = GradleScript::parse(&source).ok()?.test_report_destination?;
    Some(expand_destination(&destination, project_dir))
}

/// Expand the project variables a report destination usually refers to
fn expand_destination(destination: &str, project_dir: &Path) -> PathBuf {
    let build_dir = project_dir.join("build");
    let build_dir = build_dir.to_string_lossy();
    let project_dir_text = project_dir.to_string_lossy();

    let mut expanded = destination.to_string();
    for variable in ["${project.buildDir}", "$project.buildDir", "${buildDir}", "$buildDir"] {
        expanded = expanded.replace(variable, &build_dir);
    }
    for variable in ["${projectDir}", "$projectDir", "${rootDir}", "$rootDir"] {
        expanded = expanded.replace(variable, &project_dir_text);
    }

    let mut path = PathBuf::from(expanded);
    if path.is_relative() {
        path = project_dir.join(path);
    }
    if path.extension().is_some_and(|ext| ext == "html") {
        path
    } else {
        path.join(REPORT_FILE)
    }
}

fn newest_report_under(root: &Path) -> Option<(SystemTime, PathBuf)> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && (name == ".git" || name == "node_modules"))
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == REPORT_FILE)
        .filter(|e| {
            fs::read_to_string(e.path())
                .map(|html| html.contains(TEST_REPORT_MARKER))
                .unwrap_or(false)
        })
        .filter_map(|e| {
            let modified = e.metadata().ok()?.modified().ok()?;
            trace!("Candidate test report {}", e.path().display());
            Some((modified, e.into_path()))
        })
        .max_by_key(|(modified, _)| *modified)
}

//! Test report locations

use crate::gradle::report::resolve_test_report;
use crate::types::BuildTool;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Maven integration tests, `target/site/failsafe-report.html`
    Failsafe,
    /// Maven unit tests, `target/site/surefire-report.html`
    Surefire,
    /// Gradle `test` task HTML report
    Gradle,
}

impl ReportKind {
    pub fn build_tool(&self) -> BuildTool {
        match self {
            ReportKind::Failsafe | ReportKind::Surefire => BuildTool::Maven,
            ReportKind::Gradle => BuildTool::Gradle,
        }
    }

    /// Title of the view the report is shown in
    pub fn title(&self, project_label: &str) -> String {
        match self {
            ReportKind::Failsafe => format!("liberty-dev: {project_label} integration test report"),
            ReportKind::Surefire => format!("liberty-dev: {project_label} unit test report"),
            ReportKind::Gradle => format!("liberty-dev: {project_label} test report"),
        }
    }

    /// Location of the report for a build file. Maven reports have a fixed
    /// location; Gradle reports are searched for under `search_roots`.
    pub fn resolve(&self, build_file: &Path, search_roots: &[PathBuf]) -> PathBuf {
        let project_dir = build_file.parent().unwrap_or(Path::new("."));
        match self {
            ReportKind::Failsafe | ReportKind::Surefire => project_dir
                .join("target")
                .join("site")
                .join(format!("{self}-report.html")),
            ReportKind::Gradle => resolve_test_report(build_file, search_roots),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportKind::Failsafe => "failsafe",
            ReportKind::Surefire => "surefire",
            ReportKind::Gradle => "gradle",
        })
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "failsafe" | "integration" => Ok(ReportKind::Failsafe),
            "surefire" | "unit" => Ok(ReportKind::Surefire),
            "gradle" | "test" => Ok(ReportKind::Gradle),
            other => Err(format!("unknown report '{other}'")),
        }
    }
}

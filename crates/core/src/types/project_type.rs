use serde::{Deserialize, Serialize};
use std::fmt;

/// Build tool a project is driven by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    /// Name of the build file this tool reads
    pub fn build_file_name(&self) -> &'static str {
        match self {
            BuildTool::Maven => "pom.xml",
            BuildTool::Gradle => "build.gradle",
        }
    }
}

/// Classification tag of a dev mode project.
///
/// The container variants mark projects whose declared plugin version is new
/// enough to run dev mode inside a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "libertyMavenProject")]
    LibertyMaven,
    #[serde(rename = "libertyMavenProjectContainer")]
    LibertyMavenContainer,
    #[serde(rename = "libertyGradleProject")]
    LibertyGradle,
    #[serde(rename = "libertyGradleProjectContainer")]
    LibertyGradleContainer,
}

impl ProjectType {
    pub fn new(tool: BuildTool, container: bool) -> Self {
        match (tool, container) {
            (BuildTool::Maven, false) => ProjectType::LibertyMaven,
            (BuildTool::Maven, true) => ProjectType::LibertyMavenContainer,
            (BuildTool::Gradle, false) => ProjectType::LibertyGradle,
            (BuildTool::Gradle, true) => ProjectType::LibertyGradleContainer,
        }
    }

    pub fn build_tool(&self) -> BuildTool {
        match self {
            ProjectType::LibertyMaven | ProjectType::LibertyMavenContainer => BuildTool::Maven,
            ProjectType::LibertyGradle | ProjectType::LibertyGradleContainer => BuildTool::Gradle,
        }
    }

    pub fn supports_container(&self) -> bool {
        matches!(
            self,
            ProjectType::LibertyMavenContainer | ProjectType::LibertyGradleContainer
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::LibertyMaven => "libertyMavenProject",
            ProjectType::LibertyMavenContainer => "libertyMavenProjectContainer",
            ProjectType::LibertyGradle => "libertyGradleProject",
            ProjectType::LibertyGradleContainer => "libertyGradleProjectContainer",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_type_components() {
        let ty = ProjectType::new(BuildTool::Gradle, true);
        assert_eq!(ty, ProjectType::LibertyGradleContainer);
        assert_eq!(ty.build_tool(), BuildTool::Gradle);
        assert!(ty.supports_container());
        assert!(!ProjectType::LibertyMaven.supports_container());
    }

    #[test]
    fn test_project_type_serializes_as_tag() {
        let json = serde_json::to_string(&ProjectType::LibertyMavenContainer).unwrap();
        assert_eq!(json, "\"libertyMavenProjectContainer\"");

        let parsed: ProjectType = serde_json::from_str("\"libertyGradleProject\"").unwrap();
        assert_eq!(parsed, ProjectType::LibertyGradle);
    }
}

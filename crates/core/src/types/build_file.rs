use std::path::{Path, PathBuf};

use super::ProjectType;

/// Outcome of classifying one build file during a discovery pass.
///
/// A build file is valid exactly when it carries a project type, so the
/// tag and the validity flag can never disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildFile {
    pub path: PathBuf,
    project_type: Option<ProjectType>,
    /// Child module names, only populated for Gradle multi-project parents
    pub children: Vec<String>,
}

impl BuildFile {
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn valid(project_type: ProjectType) -> Self {
        Self {
            project_type: Some(project_type),
            ..Self::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_children(mut self, children: Vec<String>) -> Self {
        self.children = children;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.project_type.is_some()
    }

    pub fn project_type(&self) -> Option<ProjectType> {
        self.project_type
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_follows_project_type() {
        assert!(!BuildFile::invalid().is_valid());
        assert_eq!(BuildFile::invalid().project_type(), None);

        let file = BuildFile::valid(ProjectType::LibertyMaven).with_path("/ws/pom.xml");
        assert!(file.is_valid());
        assert_eq!(file.path(), Path::new("/ws/pom.xml"));
    }
}

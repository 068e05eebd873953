//! Finding dev mode projects under the workspace roots.
//!
//! A discovery pass reads every candidate build file, classifies it and
//! returns the valid ones. Maven and Gradle each take two passes so that
//! children of multi-module parents are recognised even when they do not
//! mention the plugin themselves. Roots with no project at all fall back to
//! the Liberty server configuration location.

pub mod scan;

use crate::cache::ParseCache;
use crate::error::{Error, Result};
use crate::gradle::classifier::{self as gradle_classifier, includes_directory};
use crate::gradle::GradleScript;
use crate::maven::classifier::{self as maven_classifier, ChildModuleMap};
use crate::maven::Pom;
use crate::types::{BuildTool, ProjectType};
use scan::{GRADLE_BUILD_FILE, POM_FILE};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Location of the server configuration relative to a project root
pub const SERVER_CONFIG_PATH: &str = "src/main/liberty/config/server.xml";

/// A valid project found by a discovery pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProject {
    pub label: String,
    pub path: PathBuf,
    pub project_type: ProjectType,
}

pub struct Discovery<'a> {
    cache: &'a mut ParseCache,
    exclude_dirs: &'a [String],
}

impl<'a> Discovery<'a> {
    pub fn new(cache: &'a mut ParseCache, exclude_dirs: &'a [String]) -> Self {
        Self {
            cache,
            exclude_dirs,
        }
    }

    pub fn discover(&mut self, roots: &[PathBuf]) -> Vec<DiscoveredProject> {
        let candidates = scan::find_build_files(roots, self.exclude_dirs);
        let mut found = Vec::new();

        self.discover_maven(&candidates.poms, &mut found);
        self.discover_gradle(&candidates.gradle_builds, &mut found);
        self.discover_server_config(roots, &mut found);

        let mut seen = HashSet::new();
        found.retain(|project| seen.insert(project.path.clone()));

        info!("Discovered {} dev mode project(s)", found.len());
        found
    }

    fn discover_maven(&mut self, poms: &[PathBuf], found: &mut Vec<DiscoveredProject>) {
        let parsed: Vec<(&PathBuf, Pom)> = poms
            .iter()
            .filter_map(|path| self.read_pom(path).map(|pom| (path, pom)))
            .collect();

        let mut child_modules = ChildModuleMap::new();
        let mut parents = HashSet::new();
        for (path, pom) in &parsed {
            let file = maven_classifier::classify_parent(pom);
            if let Some(project_type) = file.project_type() {
                child_modules.extend(maven_classifier::child_modules(pom));
                parents.insert(*path);
                found.push(maven_project(path, pom, project_type));
            }
        }

        for (path, pom) in &parsed {
            if parents.contains(path) {
                continue;
            }
            let file = maven_classifier::classify(pom, &child_modules, dir_name(path).as_deref());
            if let Some(project_type) = file.project_type() {
                found.push(maven_project(path, pom, project_type));
            }
        }
    }

    fn discover_gradle(&mut self, builds: &[PathBuf], found: &mut Vec<DiscoveredProject>) {
        let parsed: Vec<(&PathBuf, GradleScript)> = builds
            .iter()
            .filter_map(|path| self.read_gradle(path).map(|script| (path, script)))
            .collect();

        let mut children: Vec<(String, ProjectType)> = Vec::new();
        for (path, script) in &parsed {
            let Some(settings_path) = gradle_classifier::find_settings_file(path) else {
                continue;
            };
            let Some(settings) = self.read_gradle(&settings_path) else {
                continue;
            };
            let file = gradle_classifier::find_child_projects(script, &settings);
            if let Some(project_type) = file.project_type() {
                debug!("{} declares children {:?}", path.display(), file.children);
                children.extend(file.children.into_iter().map(|child| (child, project_type)));
            }
        }

        for (path, script) in &parsed {
            let dir = dir_name(path).unwrap_or_default();
            let inherited = children
                .iter()
                .find(|(child, _)| includes_directory(child, &dir))
                .map(|(_, project_type)| *project_type);

            let project_type =
                inherited.or_else(|| gradle_classifier::classify(script).project_type());
            if let Some(project_type) = project_type {
                found.push(DiscoveredProject {
                    label: gradle_classifier::resolve_project_name(path),
                    path: (*path).clone(),
                    project_type,
                });
            }
        }
    }

    fn discover_server_config(&mut self, roots: &[PathBuf], found: &mut Vec<DiscoveredProject>) {
        for root in roots {
            if found.iter().any(|project| project.path.starts_with(root)) {
                continue;
            }

            let server_xml = root.join(SERVER_CONFIG_PATH);
            if !server_xml.is_file() {
                continue;
            }

            // server.xml -> config -> liberty -> main -> src -> project root
            let Some(project_root) = server_xml.ancestors().nth(5) else {
                continue;
            };
            let pom = project_root.join(POM_FILE);
            let gradle = project_root.join(GRADLE_BUILD_FILE);

            let project = if pom.is_file() {
                let artifact_id = self.read_pom(&pom).and_then(|p| p.artifact_id);
                DiscoveredProject {
                    label: artifact_id.or_else(|| dir_name(&pom)).unwrap_or_default(),
                    path: pom,
                    project_type: ProjectType::LibertyMaven,
                }
            } else if gradle.is_file() {
                DiscoveredProject {
                    label: gradle_classifier::resolve_project_name(&gradle),
                    path: gradle,
                    project_type: ProjectType::LibertyGradle,
                }
            } else {
                continue;
            };

            debug!(
                "Using {} found through {}",
                project.path.display(),
                server_xml.display()
            );
            found.push(project);
        }
    }

    /// Classify a single build file chosen by the user. Files that do not
    /// mention the plugin are still accepted, tagged by file name.
    pub fn classify_build_file(&mut self, path: &Path) -> Result<DiscoveredProject> {
        if !path.is_file() {
            return Err(Error::Other(format!("{} is not a file", path.display())));
        }

        match path.file_name().and_then(|n| n.to_str()) {
            Some(POM_FILE) => {
                let pom = self.read_pom(path).unwrap_or_default();
                let detected = maven_classifier::classify_parent(&pom)
                    .project_type()
                    .or_else(|| {
                        maven_classifier::classify(&pom, &ChildModuleMap::new(), None).project_type()
                    });
                let project_type =
                    detected.unwrap_or_else(|| ProjectType::new(BuildTool::Maven, false));
                Ok(maven_project(path, &pom, project_type))
            }
            Some(GRADLE_BUILD_FILE) => {
                let detected = self
                    .read_gradle(path)
                    .and_then(|script| gradle_classifier::classify(&script).project_type());
                Ok(DiscoveredProject {
                    label: gradle_classifier::resolve_project_name(path),
                    path: path.to_path_buf(),
                    project_type: detected
                        .unwrap_or_else(|| ProjectType::new(BuildTool::Gradle, false)),
                })
            }
            _ => Err(Error::Other(format!(
                "{} is not a {POM_FILE} or {GRADLE_BUILD_FILE}",
                path.display()
            ))),
        }
    }

    fn read_pom(&mut self, path: &Path) -> Option<Pom> {
        let source = read_build_file(path)?;
        self.cache
            .pom(path, &source)
            .map_err(|e| warn!("Skipping {}: {}", path.display(), e))
            .ok()
    }

    fn read_gradle(&mut self, path: &Path) -> Option<GradleScript> {
        let source = read_build_file(path)?;
        self.cache
            .gradle_script(path, &source)
            .map_err(|e| warn!("Skipping {}: {}", path.display(), e))
            .ok()
    }
}

fn read_build_file(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .map_err(|e| warn!("Cannot read {}: {}", path.display(), e))
        .ok()
}

fn maven_project(path: &Path, pom: &Pom, project_type: ProjectType) -> DiscoveredProject {
    DiscoveredProject {
        label: pom
            .artifact_id
            .clone()
            .or_else(|| dir_name(path))
            .unwrap_or_default(),
        path: path.to_path_buf(),
        project_type,
    }
}

/// Name of the directory holding a build file
fn dir_name(build_file: &Path) -> Option<String> {
    build_file
        .parent()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn discover(root: &Path) -> Vec<DiscoveredProject> {
        let mut cache = ParseCache::default();
        let exclude = vec!["target".to_string()];
        Discovery::new(&mut cache, &exclude).discover(&[root.to_path_buf()])
    }

    #[test]
    fn test_server_config_fallback_maven() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join(SERVER_CONFIG_PATH), "<server/>");
        write(
            &temp.path().join(POM_FILE),
            "<project><artifactId>plain</artifactId></project>",
        );

        let found = discover(temp.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "plain");
        assert_eq!(found[0].project_type, ProjectType::LibertyMaven);
    }

    #[test]
    fn test_server_config_fallback_gradle() {
        let temp = TempDir::new().unwrap();
        write(&temp.path().join(SERVER_CONFIG_PATH), "<server/>");
        write(&temp.path().join(GRADLE_BUILD_FILE), "apply plugin: 'war'\n");

        let found = discover(temp.path());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].project_type, ProjectType::LibertyGradle);
    }

    #[test]
    fn test_no_fallback_without_server_config() {
        let temp = TempDir::new().unwrap();
        write(
            &temp.path().join(POM_FILE),
            "<project><artifactId>plain</artifactId></project>",
        );
        assert!(discover(temp.path()).is_empty());
    }

    #[test]
    fn test_classify_build_file() {
        let temp = TempDir::new().unwrap();
        let pom = temp.path().join("legacy").join(POM_FILE);
        write(&pom, "<project><artifactId>legacy-app</artifactId></project>");
        let other = temp.path().join("README.md");
        write(&other, "");

        let mut cache = ParseCache::default();
        let exclude = Vec::new();
        let mut discovery = Discovery::new(&mut cache, &exclude);

        let project = discovery.classify_build_file(&pom).unwrap();
        assert_eq!(project.label, "legacy-app");
        assert_eq!(project.project_type, ProjectType::LibertyMaven);

        assert!(discovery.classify_build_file(&other).is_err());
        assert!(discovery.classify_build_file(&temp.path().join("missing.xml")).is_err());
    }
}

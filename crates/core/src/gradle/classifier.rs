//! Decides whether a build.gradle describes a dev mode project

use super::script::{Dependency, GradleScript, PluginSection};
use crate::types::{BuildFile, BuildTool, ProjectType};
use crate::version::{self, GRADLE_CONTAINER_VERSION};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const LIBERTY_PLUGIN_ID: &str = "liberty";
pub const LIBERTY_GROUP_ID: &str = "io.openliberty.tools";
pub const LIBERTY_GRADLE_PLUGIN: &str = "liberty-gradle-plugin";

pub const SETTINGS_FILE: &str = "settings.gradle";

/// Classify build script text on its own top level
pub fn classify_gradle_build(source: &str) -> BuildFile {
    match GradleScript::parse(source) {
        Ok(script) => classify(&script),
        Err(e) => {
            warn!("Failed to parse build.gradle: {}", e);
            BuildFile::invalid()
        }
    }
}

/// A script is a project when its top level, or its `allprojects { }`
/// section, applies the liberty plugin and puts it on the classpath.
pub fn classify(script: &GradleScript) -> BuildFile {
    let detected = section_type(&script.root, &[]).or_else(|| {
        script
            .allprojects
            .as_ref()
            .and_then(|section| section_type(section, &script.root.classpath))
    });

    match detected {
        Some(project_type) => BuildFile::valid(project_type),
        None => BuildFile::invalid(),
    }
}

/// Children of a multi-project build.
///
/// Valid only when the parent's `subprojects { }` or `allprojects { }`
/// section applies the plugin. The returned children are the `include`d
/// project paths of `settings`, and they inherit the parent's type.
pub fn find_child_projects(build: &GradleScript, settings: &GradleScript) -> BuildFile {
    if settings.includes.is_empty() {
        return BuildFile::invalid();
    }

    let detected = [&build.subprojects, &build.allprojects]
        .into_iter()
        .flatten()
        .find_map(|section| section_type(section, &build.root.classpath));

    match detected {
        Some(project_type) => {
            debug!("Multi-project build with children {:?}", settings.includes);
            BuildFile::valid(project_type).with_children(settings.includes.clone())
        }
        None => BuildFile::invalid(),
    }
}

/// Locate the settings file for a build file: a sibling `settings.gradle`,
/// else `master/settings.gradle` next to it.
pub fn find_settings_file(build_file: &Path) -> Option<PathBuf> {
    let dir = build_file.parent()?;
    [dir.join(SETTINGS_FILE), dir.join("master").join(SETTINGS_FILE)]
        .into_iter()
        .find(|candidate| candidate.is_file())
}

/// `rootProject.name` from the settings file, else the directory name
pub fn resolve_project_name(build_file: &Path) -> String {
    let from_settings = find_settings_file(build_file)
        .and_then(|settings| fs::read_to_string(settings).ok())
        .and_then(|source| GradleScript::parse(&source).ok())
        .and_then(|script| script.root_project_name)
        .filter(|name| !name.is_empty());

    from_settings.unwrap_or_else(|| {
        build_file
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

/// Whether an `include`d project path names the given directory
pub fn includes_directory(child: &str, dir_name: &str) -> bool {
    child.rsplit(':').next() == Some(dir_name)
}

fn section_type(section: &PluginSection, inherited_classpath: &[Dependency]) -> Option<ProjectType> {
    if !section.applies(LIBERTY_PLUGIN_ID) {
        return None;
    }

    let dependency = section
        .classpath
        .iter()
        .chain(inherited_classpath)
        .find(|d| d.is(LIBERTY_GROUP_ID, LIBERTY_GRADLE_PLUGIN))?;

    let container =
        version::supports_container(dependency.version.as_deref(), &GRADLE_CONTAINER_VERSION);
    Some(ProjectType::new(BuildTool::Gradle, container))
}

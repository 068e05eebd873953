//! Gradle build file support

pub mod classifier;
pub mod dsl;
pub mod report;
pub mod script;

pub use classifier::{
    classify_gradle_build, find_child_projects, find_settings_file, resolve_project_name,
};
pub use script::GradleScript;

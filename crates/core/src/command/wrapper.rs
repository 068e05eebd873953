use super::shell::ShellKind;
use crate::types::BuildTool;
use std::path::{Path, PathBuf};

/// Find the nearest wrapper script at or above the build file's directory
pub fn find_wrapper(build_file: &Path, tool: BuildTool, shell: ShellKind) -> Option<PathBuf> {
    let names = shell.wrapper_names(tool);
    build_file.parent()?.ancestors().find_map(|dir| {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

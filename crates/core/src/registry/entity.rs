use crate::host::Terminal;
use crate::types::ProjectType;
use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identity of a project entity across rediscovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// A discovered project, owning at most one terminal
pub struct ProjectEntity {
    id: EntityId,
    pub label: String,
    path: PathBuf,
    project_type: ProjectType,
    terminal: Option<Box<dyn Terminal>>,
}

impl ProjectEntity {
    pub fn new(id: EntityId, label: String, path: PathBuf, project_type: ProjectType) -> Self {
        Self {
            id,
            label,
            path,
            project_type,
            terminal: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Build file path, the registry key
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    /// Directory holding the build file
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }

    pub(crate) fn set_project_type(&mut self, project_type: ProjectType) {
        self.project_type = project_type;
    }

    pub fn has_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn terminal_mut(&mut self) -> Option<&mut (dyn Terminal + 'static)> {
        self.terminal.as_deref_mut()
    }

    pub(crate) fn terminal(&self) -> Option<&dyn Terminal> {
        self.terminal.as_deref()
    }

    /// Attach a terminal unless one is already attached
    pub(crate) fn attach_terminal(&mut self, terminal: Box<dyn Terminal>) -> bool {
        if self.terminal.is_some() {
            return false;
        }
        self.terminal = Some(terminal);
        true
    }

    pub(crate) fn detach_terminal(&mut self) -> Option<Box<dyn Terminal>> {
        self.terminal.take()
    }
}

impl fmt::Debug for ProjectEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectEntity")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("path", &self.path)
            .field("project_type", &self.project_type)
            .field("terminal", &self.terminal.as_ref().map(|t| t.id()))
            .finish()
    }
}

//! Per-workspace dashboard state persisted between sessions

use crate::error::Result;
use crate::types::ProjectType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STATE_DIR: &str = ".liberty-dev";
pub const STATE_FILE: &str = "dashboard.json";

/// Most custom parameter strings remembered
pub const MAX_RECENT_PARAMETERS: usize = 10;

/// A project the user added by hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedProject {
    pub label: String,
    pub path: PathBuf,
    pub project_type: ProjectType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    #[serde(default)]
    pub projects: Vec<PersistedProject>,
    #[serde(default)]
    pub last_custom_parameters: String,
    #[serde(default)]
    pub recent_custom_parameters: Vec<String>,
}

impl DashboardState {
    pub fn state_file(workspace_root: &Path) -> PathBuf {
        workspace_root.join(STATE_DIR).join(STATE_FILE)
    }

    /// Load state, treating a missing file as empty state
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn contains_project(&self, path: &Path) -> bool {
        self.projects.iter().any(|p| p.path == path)
    }

    /// Returns false when a project with that path is already stored
    pub fn add_project(&mut self, project: PersistedProject) -> bool {
        if self.contains_project(&project.path) {
            return false;
        }
        self.projects.push(project);
        true
    }

    pub fn remove_project(&mut self, path: &Path) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.path != path);
        self.projects.len() != before
    }
}

//! The set of known projects, kept in step with the file system.
//!
//! Entities are keyed by build file path. Rediscovery reconciles the new
//! set against the old one: entities whose path survives keep their
//! identity and terminal, and only their tag and label are refreshed.

pub mod entity;

pub use entity::{EntityId, ProjectEntity};

use crate::cache::ParseCache;
use crate::config::Config;
use crate::discovery::{DiscoveredProject, Discovery};
use crate::dispatch::custom_params::ParameterHistory;
use crate::error::{Error, Result};
use crate::host::{Terminal, TerminalId};
use crate::state::{DashboardState, PersistedProject};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type Listener = Box<dyn FnMut(&Registry)>;

pub struct Registry {
    roots: Vec<PathBuf>,
    config: Config,
    cache: ParseCache,
    state: DashboardState,
    state_path: Option<PathBuf>,
    projects: HashMap<PathBuf, ProjectEntity>,
    terminals: HashMap<TerminalId, PathBuf>,
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    pub fn new(roots: Vec<PathBuf>, config: Config) -> Self {
        let cache = ParseCache::new(config.parse_cache_capacity);
        Self {
            roots,
            config,
            cache,
            state: DashboardState::default(),
            state_path: None,
            projects: HashMap::new(),
            terminals: HashMap::new(),
            next_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Load and keep persisting dashboard state at `path`
    pub fn with_state_file(mut self, path: PathBuf) -> Result<Self> {
        self.state = DashboardState::load(&path)?;
        self.state_path = Some(path);
        Ok(self)
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Rediscover every root, reconcile and notify subscribers. Added
    /// projects are classified again so edits to their build files count.
    pub fn refresh(&mut self) {
        let mut discovery = Discovery::new(&mut self.cache, &self.config.exclude_dirs);
        let mut discovered = discovery.discover(&self.roots);
        let mut state_changed = false;

        for persisted in &mut self.state.projects {
            if discovered.iter().any(|p| p.path == persisted.path) {
                continue;
            }
            if !persisted.path.is_file() {
                debug!("Added project {} no longer exists", persisted.path.display());
                continue;
            }
            match discovery.classify_build_file(&persisted.path) {
                Ok(project) if project.project_type != persisted.project_type => {
                    debug!(
                        "Added project {} is now {}",
                        persisted.path.display(),
                        project.project_type
                    );
                    persisted.project_type = project.project_type;
                    state_changed = true;
                }
                Ok(_) => {}
                Err(e) => warn!("Cannot classify {}: {}", persisted.path.display(), e),
            }
            discovered.push(DiscoveredProject {
                label: persisted.label.clone(),
                path: persisted.path.clone(),
                project_type: persisted.project_type,
            });
        }

        if state_changed {
            self.persist();
        }
        let (hits, misses) = self.cache.stats();
        debug!("Parse cache: {} entries, {} hits, {} misses", self.cache.len(), hits, misses);
        self.reconcile(discovered);
        self.notify();
    }

    /// Replace the project set with `discovered`, preserving the identity
    /// and terminal of every entity whose path is still present.
    pub fn reconcile(&mut self, discovered: Vec<DiscoveredProject>) {
        let mut previous = std::mem::take(&mut self.projects);

        for project in discovered {
            if self.projects.contains_key(&project.path) {
                continue;
            }

            let entity = match previous.remove(&project.path) {
                Some(mut entity) => {
                    if entity.project_type() != project.project_type {
                        debug!(
                            "{} changed from {} to {}",
                            project.path.display(),
                            entity.project_type(),
                            project.project_type
                        );
                        entity.set_project_type(project.project_type);
                    }
                    entity.label = project.label;
                    entity
                }
                None => {
                    let id = EntityId(self.next_id);
                    self.next_id += 1;
                    debug!("New project {} at {}", project.label, project.path.display());
                    ProjectEntity::new(id, project.label, project.path.clone(), project.project_type)
                }
            };
            self.projects.insert(project.path, entity);
        }

        // Terminals of vanished projects keep running, unreachable from here
        for (path, entity) in previous {
            debug!("Project at {} is gone", path.display());
            if let Some(terminal) = entity.terminal() {
                self.terminals.remove(&terminal.id());
            }
        }
    }

    /// Projects ordered by label, then path
    pub fn projects(&self) -> Vec<&ProjectEntity> {
        let mut projects: Vec<_> = self.projects.values().collect();
        projects.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.path().cmp(b.path())));
        projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&ProjectEntity> {
        self.projects.get(path)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut ProjectEntity> {
        self.projects.get_mut(path)
    }

    /// Look a project up by label, build file path or project directory
    pub fn find(&self, query: &str) -> Option<&ProjectEntity> {
        let as_path = Path::new(query);
        let projects = self.projects();
        projects
            .iter()
            .find(|p| p.label == query)
            .or_else(|| projects.iter().find(|p| p.path() == as_path))
            .or_else(|| projects.iter().find(|p| p.project_dir() == as_path))
            .copied()
    }

    /// Attach a terminal to a project. A project that already has one
    /// keeps it and the new terminal is dropped.
    pub fn attach_terminal(&mut self, path: &Path, terminal: Box<dyn Terminal>) -> bool {
        let Some(entity) = self.projects.get_mut(path) else {
            return false;
        };
        let id = terminal.id();
        if !entity.attach_terminal(terminal) {
            return false;
        }
        self.terminals.insert(id, path.to_path_buf());
        true
    }

    /// Forget a terminal the user closed; returns the project it belonged to
    pub fn terminal_closed(&mut self, id: TerminalId) -> Option<PathBuf> {
        let Some(path) = self.terminals.remove(&id) else {
            debug!("{} does not belong to any project", id);
            return None;
        };
        if let Some(entity) = self.projects.get_mut(&path) {
            entity.detach_terminal();
            debug!("{} closed for {}", id, entity.label);
        }
        Some(path)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Registry) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Add a build file outside discovery's reach; it is remembered in the
    /// dashboard state.
    pub fn add_project(&mut self, path: &Path) -> Result<PathBuf> {
        let path = path
            .canonicalize()
            .map_err(|e| Error::Other(format!("Cannot add {}: {e}", path.display())))?;
        let project =
            Discovery::new(&mut self.cache, &self.config.exclude_dirs).classify_build_file(&path)?;

        let added = self.state.add_project(PersistedProject {
            label: project.label.clone(),
            path: project.path.clone(),
            project_type: project.project_type,
        });
        if added {
            info!("Added project {} ({})", project.label, project.path.display());
            self.persist();
        }
        self.refresh();
        Ok(path)
    }

    /// Remove a project added with [`Registry::add_project`]. Discovered
    /// projects cannot be removed.
    pub fn remove_project(&mut self, path: &Path) -> Result<bool> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !self.state.remove_project(&path) {
            return Ok(false);
        }
        info!("Removed project {}", path.display());
        self.persist();
        self.refresh();
        Ok(true)
    }

    pub fn parameter_history(&self) -> ParameterHistory {
        ParameterHistory::new(
            &self.state.last_custom_parameters,
            self.state.recent_custom_parameters.clone(),
        )
    }

    pub fn persist_parameters(&mut self, history: &ParameterHistory) {
        self.state.last_custom_parameters = history.last().unwrap_or_default().to_string();
        self.state.recent_custom_parameters = history.recent().to_vec();
        self.persist();
    }

    fn persist(&self) {
        if let Some(path) = &self.state_path {
            if let Err(e) = self.state.save(path) {
                warn!("Failed to save {}: {}", path.display(), e);
            }
        }
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(self);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }
}

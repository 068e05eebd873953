use crate::command::ShellKind;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".liberty-dev.json";

/// Directories never searched for build files
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", "node_modules", "target", "build", ".gradle"];

/// Executable used for one build tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ToolConfig {
    /// Command run when no wrapper script is used
    pub executable: String,
    /// Use `mvnw`/`gradlew` when one is found above the build file
    #[serde(default = "default_true")]
    pub prefer_wrapper: bool,
}

impl ToolConfig {
    fn new(executable: &str) -> Self {
        Self {
            executable: executable.to_string(),
            prefer_wrapper: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    #[serde(default = "default_maven")]
    pub maven: ToolConfig,
    #[serde(default = "default_gradle")]
    pub gradle: ToolConfig,

    /// Shell the terminals run; detected from the environment when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<ShellKind>,

    /// Exported as `JAVA_HOME` into terminals; falls back to the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub java_home: Option<String>,

    /// Plain start runs dev mode in a container when the project supports it
    #[serde(default)]
    pub container: bool,

    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    #[serde(default = "default_cache_capacity")]
    pub parse_cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maven: default_maven(),
            gradle: default_gradle(),
            shell: None,
            java_home: None,
            container: false,
            exclude_dirs: default_exclude_dirs(),
            parse_cache_capacity: default_cache_capacity(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` to the nearest config file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            current = current.parent()?;
        }
    }

    /// Config for a workspace: the nearest config file, else defaults
    pub fn load(workspace_root: &Path) -> Result<Self> {
        match Self::find_config_file(workspace_root) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, tool) in [("maven", &self.maven), ("gradle", &self.gradle)] {
            if tool.executable.trim().is_empty() {
                return Err(Error::ConfigError(format!(
                    "{name}.executable must not be empty"
                )));
            }
        }
        if self.parse_cache_capacity == 0 {
            return Err(Error::ConfigError(
                "parse_cache_capacity must be at least 1".to_string(),
            ));
        }
        if let Some(java_home) = &self.java_home {
            if java_home.trim().is_empty() {
                return Err(Error::ConfigError("java_home must not be empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn shell(&self) -> ShellKind {
        self.shell.unwrap_or_else(ShellKind::current)
    }

    pub fn java_home(&self) -> Option<String> {
        self.java_home
            .clone()
            .or_else(|| std::env::var("JAVA_HOME").ok())
            .filter(|home| !home.is_empty())
    }

    pub fn is_excluded(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|excluded| excluded == dir_name)
    }
}

fn default_true() -> bool {
    true
}

fn default_maven() -> ToolConfig {
    ToolConfig::new("mvn")
}

fn default_gradle() -> ToolConfig {
    ToolConfig::new("gradle")
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect()
}

fn default_cache_capacity() -> usize {
    crate::cache::parse_cache::DEFAULT_CAPACITY
}

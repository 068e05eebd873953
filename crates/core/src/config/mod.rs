//! Configuration management for liberty-dev

mod settings;

pub use settings::{CONFIG_FILE_NAME, Config, DEFAULT_EXCLUDE_DIRS, ToolConfig};

pub mod build_file;
pub mod project_type;

// Re-export commonly used types
pub use build_file::BuildFile;
pub use project_type::{BuildTool, ProjectType};

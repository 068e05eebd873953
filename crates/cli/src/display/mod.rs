pub mod formatter;

pub use formatter::{describe_type, print_projects, projects_json};

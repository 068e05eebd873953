pub mod command;
pub mod init;
pub mod list;
pub mod project;
pub mod report;
pub mod session;

pub use command::command_command;
pub use init::init_command;
pub use list::list_command;
pub use project::{add_command, remove_command};
pub use report::report_command;
pub use session::session_command;

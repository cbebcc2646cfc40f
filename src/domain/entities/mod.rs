mod tool_usage;
mod user;
mod user_file;

pub use tool_usage::{NewToolUsage, ToolUsage};
pub use user::{NewUser, User};
pub use user_file::{NewUserFile, UserFile};

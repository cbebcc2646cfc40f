mod email;
mod output_format;
mod tool_category;
mod user_id;

pub use email::Email;
pub use output_format::OutputFormat;
pub use tool_category::ToolCategory;
pub use user_id::UserId;

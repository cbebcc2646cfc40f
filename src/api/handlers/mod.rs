pub mod auth;
pub mod download;
pub mod health;
pub mod history;
pub mod tools;

pub use auth::{login_handler, me_handler, signup_handler};
pub use download::download_handler;
pub use health::health_handler;
pub use history::{files_handler, history_handler};
pub use tools::{get_tool_handler, list_tools_handler, process_tool_handler};

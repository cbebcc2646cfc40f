mod auth;
mod download_output;
mod process_tool;
mod usage_history;

pub use auth::{AuthError, GetCurrentUserUseCase, LoginUseCase, SignupUseCase};
pub use download_output::{content_type_for, is_safe_file_name, DownloadError, DownloadOutputUseCase};
pub use process_tool::{IncomingFile, ProcessError, ProcessRequest, ProcessToolUseCase};
pub use usage_history::{HistoryError, UsageHistoryUseCase, HISTORY_LIMIT};

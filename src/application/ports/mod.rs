mod credentials;
mod output_store;
mod tool_usage_repository;
mod user_file_repository;
mod user_repository;

pub use credentials::{CredentialError, PasswordHasher, TokenIdentity, TokenService};
pub use output_store::{FileReader, OutputStore, StorageError, StoredUpload};
pub use tool_usage_repository::{ToolUsageRepository, UsageStats};
pub use user_file_repository::UserFileRepository;
pub use user_repository::{RepositoryError, UserRepository};

#[cfg(test)]
pub use credentials::{MockPasswordHasher, MockTokenService};
#[cfg(test)]
pub use output_store::MockOutputStore;
#[cfg(test)]
pub use tool_usage_repository::MockToolUsageRepository;
#[cfg(test)]
pub use user_file_repository::MockUserFileRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

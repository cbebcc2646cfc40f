mod in_memory_tool_usage_repository;
mod in_memory_user_file_repository;
mod in_memory_user_repository;

pub use in_memory_tool_usage_repository::InMemoryToolUsageRepository;
pub use in_memory_user_file_repository::InMemoryUserFileRepository;
pub use in_memory_user_repository::InMemoryUserRepository;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

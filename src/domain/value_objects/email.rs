use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Normalized (trimmed, lower-cased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let normalized = raw.trim().to_lowercase();
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(DomainError::InvalidEmail(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::new("  Ravi@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ravi@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("a@b").is_err());
        assert!(Email::new("").is_err());
    }
}

use std::path::PathBuf;

pub const MB: u64 = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub uploads_dir: PathBuf,
    pub max_file_size_bytes: u64,
    pub max_request_size_bytes: u64,
    /// Signing secret; `None` means a random one is generated at startup
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    pub upload_ttl_secs: i64,
    pub sweep_interval_secs: u64,
    /// `*` or a comma-separated origin list
    pub cors_allow_origin: String,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_file_size_bytes: env_or("MAX_FILE_SIZE_BYTES", 50 * MB),
            max_request_size_bytes: env_or("MAX_REQUEST_SIZE_BYTES", 120 * MB),
            jwt_secret: std::env::var("JWT_SECRET").ok().filter(|s| !s.is_empty()),
            token_ttl_hours: env_or("TOKEN_TTL_HOURS", 24),
            upload_ttl_secs: env_or("UPLOAD_TTL_SECS", 3600),
            sweep_interval_secs: env_or("SWEEP_INTERVAL_SECS", 300),
            cors_allow_origin: std::env::var("CORS_ALLOW_ORIGIN")
                .unwrap_or_else(|_| "*".to_string()),
        }
    }

    /// Defaults rooted at `uploads_dir`, for tests and the CLI
    pub fn for_uploads_dir(uploads_dir: PathBuf) -> Self {
        Self {
            listen_addr: "127.0.0.1:0".to_string(),
            uploads_dir,
            max_file_size_bytes: 50 * MB,
            max_request_size_bytes: 120 * MB,
            jwt_secret: None,
            token_ttl_hours: 24,
            upload_ttl_secs: 3600,
            sweep_interval_secs: 300,
            cors_allow_origin: "*".to_string(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if self.max_file_size_bytes == 0 {
            return Err("MAX_FILE_SIZE_BYTES must be positive".to_string());
        }

        if self.max_request_size_bytes < self.max_file_size_bytes {
            return Err(
                "MAX_REQUEST_SIZE_BYTES must be at least MAX_FILE_SIZE_BYTES".to_string(),
            );
        }

        if let Some(secret) = &self.jwt_secret {
            if secret.len() < 16 {
                return Err("JWT_SECRET must be at least 16 characters".to_string());
            }
        }

        if self.token_ttl_hours < 1 {
            return Err("TOKEN_TTL_HOURS must be at least 1".to_string());
        }

        if self.upload_ttl_secs < 1 {
            return Err("UPLOAD_TTL_SECS must be positive".to_string());
        }

        if self.sweep_interval_secs < 10 {
            return Err("SWEEP_INTERVAL_SECS must be at least 10 seconds".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::for_uploads_dir(PathBuf::from("/tmp/uploads"));
        assert!(config.validate().is_ok());
        assert_eq!(config.max_file_size_bytes, 52_428_800);
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = Config::for_uploads_dir(PathBuf::from("/tmp/uploads"));
        config.jwt_secret = Some("short".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_ceiling_below_file_limit_rejected() {
        let mut config = Config::for_uploads_dir(PathBuf::from("/tmp/uploads"));
        config.max_request_size_bytes = MB;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_sweep_interval_floor() {
        let mut config = Config::for_uploads_dir(PathBuf::from("/tmp/uploads"));
        config.sweep_interval_secs = 1;
        assert!(config.validate().is_err());
    }
}

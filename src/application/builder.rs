use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::api::middleware::size_limits::SizeLimitConfig;
use crate::api::router::AppState;
use crate::application::{
    ports::{
        OutputStore, PasswordHasher, TokenService, ToolUsageRepository, UserFileRepository,
        UserRepository,
    },
    sweeper::UploadSweeper,
    use_cases::{
        DownloadOutputUseCase, GetCurrentUserUseCase, LoginUseCase, ProcessToolUseCase,
        SignupUseCase, UsageHistoryUseCase,
    },
};
use crate::config::Config;
use crate::infrastructure::{
    persistence::{InMemoryToolUsageRepository, InMemoryUserFileRepository, InMemoryUserRepository},
    security::{Argon2PasswordHasher, HashParams, JwtTokenService},
    storage::LocalFilesystemStore,
};

type BuildResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Everything `main` needs: router state and the background sweeper
pub struct Application {
    pub state: AppState,
    pub sweeper: Arc<UploadSweeper>,
}

/// Application builder for clean dependency injection and setup
pub struct ApplicationBuilder {
    config: Config,
    hash_params: HashParams,
    store: Option<Arc<dyn OutputStore>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    usage_repo: Option<Arc<dyn ToolUsageRepository>>,
    file_repo: Option<Arc<dyn UserFileRepository>>,
    token_service: Option<Arc<dyn TokenService>>,
}

impl ApplicationBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            hash_params: HashParams::default(),
            store: None,
            user_repo: None,
            usage_repo: None,
            file_repo: None,
            token_service: None,
        }
    }

    /// Override Argon2 cost (tests use `HashParams::fast()`)
    pub fn with_hash_params(mut self, params: HashParams) -> Self {
        self.hash_params = params;
        self
    }

    /// Create the uploads layout on disk
    pub async fn with_storage(mut self) -> BuildResult<Self> {
        let store = Arc::new(LocalFilesystemStore::new(self.config.uploads_dir.clone()));
        store.init().await?;
        info!("Upload storage initialized at {:?}", self.config.uploads_dir);
        self.store = Some(store);
        Ok(self)
    }

    /// In-process repositories; state does not survive a restart
    pub fn with_persistence(mut self) -> Self {
        self.user_repo = Some(Arc::new(InMemoryUserRepository::new()));
        self.usage_repo = Some(Arc::new(InMemoryToolUsageRepository::new()));
        self.file_repo = Some(Arc::new(InMemoryUserFileRepository::new()));
        info!("In-memory repositories initialized");
        self
    }

    /// Token signing; falls back to a per-process random secret
    pub fn with_security(mut self) -> Self {
        let secret: Vec<u8> = match &self.config.jwt_secret {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                warn!("JWT_SECRET not set; using a random secret, tokens will not survive a restart");
                rand::random::<[u8; 32]>().to_vec()
            }
        };
        let ttl = chrono::Duration::hours(self.config.token_ttl_hours);
        self.token_service = Some(Arc::new(JwtTokenService::new(&secret, ttl)));
        self
    }

    /// Build application state with all use cases
    pub fn build(self) -> BuildResult<Application> {
        let store = self.store.ok_or("Storage not initialized")?;
        let user_repo = self.user_repo.ok_or("User repository not initialized")?;
        let usage_repo = self.usage_repo.ok_or("Usage repository not initialized")?;
        let file_repo = self.file_repo.ok_or("File repository not initialized")?;
        let token_service = self.token_service.ok_or("Token service not initialized")?;
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new(self.hash_params));

        let process_use_case = Arc::new(ProcessToolUseCase::new(
            Arc::clone(&store),
            Arc::clone(&usage_repo),
            Arc::clone(&file_repo),
            self.config.max_file_size_bytes,
            chrono::Duration::seconds(self.config.upload_ttl_secs),
        ));

        let download_use_case = Arc::new(DownloadOutputUseCase::new(Arc::clone(&store)));

        let signup_use_case = Arc::new(SignupUseCase::new(
            Arc::clone(&user_repo),
            Arc::clone(&hasher),
            Arc::clone(&token_service),
        ));

        let login_use_case = Arc::new(LoginUseCase::new(
            Arc::clone(&user_repo),
            Arc::clone(&hasher),
            Arc::clone(&token_service),
        ));

        let current_user_use_case = Arc::new(GetCurrentUserUseCase::new(Arc::clone(&user_repo)));

        let history_use_case = Arc::new(UsageHistoryUseCase::new(
            Arc::clone(&usage_repo),
            Arc::clone(&file_repo),
        ));

        let sweeper = Arc::new(UploadSweeper::new(
            Arc::clone(&file_repo),
            Arc::clone(&store),
            Duration::from_secs(self.config.sweep_interval_secs),
        ));

        info!("Application layer initialized");

        let state = AppState {
            process_use_case,
            download_use_case,
            signup_use_case,
            login_use_case,
            current_user_use_case,
            history_use_case,
            token_service,
            size_limits: SizeLimitConfig {
                max_request_size: self.config.max_request_size_bytes,
            },
            cors_allow_origin: self.config.cors_allow_origin.clone(),
        };

        Ok(Application { state, sweeper })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_requires_every_step() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_uploads_dir(dir.path().to_path_buf());
        let result = ApplicationBuilder::new(config).with_persistence().build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_full_build_creates_layout() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_uploads_dir(dir.path().to_path_buf());
        let app = ApplicationBuilder::new(config)
            .with_hash_params(HashParams::fast())
            .with_storage()
            .await
            .unwrap()
            .with_persistence()
            .with_security()
            .build()
            .unwrap();

        assert!(dir.path().join("processed").is_dir());
        assert_eq!(app.state.size_limits.max_request_size, 120 * 1024 * 1024);
    }
}

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::application::ports::{CredentialError, PasswordHasher};

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            memory_kib: 19456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl HashParams {
    /// Minimal cost for tests.
    pub fn fast() -> Self {
        Self {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Argon2id password hashing in PHC string format
pub struct Argon2PasswordHasher {
    params: HashParams,
}

impl Argon2PasswordHasher {
    pub fn new(params: HashParams) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Result<Argon2<'static>, CredentialError> {
        let params = Params::new(
            self.params.memory_kib,
            self.params.iterations,
            self.params.parallelism,
            None,
        )
        .map_err(|e| CredentialError::Hashing(format!("invalid argon2 params: {}", e)))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new(HashParams::default())
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed =
            PasswordHash::new(hash).map_err(|e| CredentialError::Hashing(e.to_string()))?;
        // Cost parameters are read from the PHC string itself
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

mod argon2_password_hasher;
mod jwt_token_service;

pub use argon2_password_hasher::{Argon2PasswordHasher, HashParams};
pub use jwt_token_service::{Claims, JwtTokenService};

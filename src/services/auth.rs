//! Staff accounts: registration, credential checks and password hashing.
//!
//! Argon2 is CPU-heavy, so hashing and verification run on the blocking
//! pool instead of the async workers.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tokio::task;
use tracing::info;

use crate::config::SecurityConfig;
use crate::constants::limits::{MIN_PASSWORD_LENGTH, USERNAME_LENGTH};
use crate::db::{SharedStorage, StorageError};
use crate::models::{NewUser, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UsernameTaken(_) => Self::UsernameTaken,
            StorageError::IdsExhausted => Self::Internal(err.to_string()),
        }
    }
}

pub struct AuthService {
    storage: SharedStorage,
    security: SecurityConfig,
}

impl AuthService {
    #[must_use]
    pub const fn new(storage: SharedStorage, security: SecurityConfig) -> Self {
        Self { storage, security }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        if !USERNAME_LENGTH.contains(&username.chars().count()) {
            return Err(AuthError::Validation(format!(
                "Username must be between {} and {} characters",
                USERNAME_LENGTH.start(),
                USERNAME_LENGTH.end()
            )));
        }
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        if self.storage.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let password = password.to_string();
        let security = self.security.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &security))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))??;

        let user = self
            .storage
            .create_user(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, "Registered user");
        Ok(user)
    }

    /// Returns the user when `password` matches; unknown usernames and
    /// wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.storage.get_user_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        let hash = user.password_hash.clone();
        let password = password.to_string();
        let is_valid = task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| {
                AuthError::Internal(format!("Password verification task panicked: {e}"))
            })??;

        if is_valid {
            Ok(user)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    pub async fn find_user(&self, id: i32) -> Result<Option<User>, AuthError> {
        Ok(self.storage.get_user(id).await?)
    }

    /// Creates the configured admin account unless it already exists.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.storage.get_user_by_username(username).await?.is_some() {
            return Ok(());
        }

        match self.register(username, password).await {
            Ok(_) | Err(AuthError::UsernameTaken) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None,
    )
    .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))?;

    Ok(hash.to_string())
}

/// The cost parameters are read back from the PHC string, so hashes made
/// under older settings keep verifying.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemStorage;
    use std::sync::Arc;

    fn cheap_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemStorage::new()), cheap_security())
    }

    #[test]
    fn test_hash_roundtrip() {
        let hash = hash_password("hunter22", &cheap_security()).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter22", &hash).unwrap());
        assert!(!verify_password("hunter23", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = service();
        let user = auth.register("editor", "s3cret-pass").await.unwrap();
        assert_ne!(user.password_hash, "s3cret-pass");

        let logged_in = auth.login("editor", "s3cret-pass").await.unwrap();
        assert_eq!(logged_in.id, user.id);

        assert!(matches!(
            auth.login("editor", "wrong-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "s3cret-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_short_input() {
        let auth = service();
        auth.register("editor", "s3cret-pass").await.unwrap();

        assert!(matches!(
            auth.register("editor", "another-pass").await,
            Err(AuthError::UsernameTaken)
        ));
        assert!(matches!(
            auth.register("ed", "s3cret-pass").await,
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(
            auth.register("editor2", "short").await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let auth = service();
        auth.ensure_admin("admin", "admin-pass").await.unwrap();
        auth.ensure_admin("admin", "different-pass").await.unwrap();

        assert!(auth.login("admin", "admin-pass").await.is_ok());
    }
}

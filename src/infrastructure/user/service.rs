//! User service: registration, login and token resolution

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::user::{validate_password, validate_username, NewUser, User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtGenerator;

use super::password::PasswordHasher;

/// Request for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token issued on successful login
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub const TOKEN_TYPE: &'static str = "bearer";
}

/// User service for authentication and registration
#[derive(Debug, Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn JwtGenerator>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        repository: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn JwtGenerator>,
    ) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.username_exists(&request.username).await? {
            return Err(DomainError::duplicate_username(request.username));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = self
            .repository
            .create(NewUser::new(request.username, password_hash))
            .await?;

        info!(user_id = %user.id(), username = %user.username(), "Registered user");

        Ok(user)
    }

    /// Check credentials and issue a bearer token
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AccessToken, DomainError> {
        let Some(user) = self.repository.get_by_username(username).await? else {
            debug!(username = %username, "Login for unknown user");
            return Err(DomainError::InvalidCredentials);
        };

        if !self.hasher.verify(password, user.password_hash()) {
            warn!(username = %username, "Login with wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let (token, claims) = self.tokens.generate(&user)?;
        info!(username = %username, "User logged in");

        Ok(AccessToken {
            token,
            expires_at: claims.expires_at(),
        })
    }

    /// Resolve a bearer token to the stored user it was issued for
    pub async fn resolve(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.validate(token)?;

        self.repository
            .get_by_username(claims.username())
            .await?
            .ok_or_else(|| DomainError::unknown_user(claims.username()))
    }

    /// Get a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_username(username).await
    }

    /// Count registered users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

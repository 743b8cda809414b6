//! JWT bearer token generation and validation

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::user::User;
use crate::domain::DomainError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (username)
    pub sub: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user, expiring a fixed window after issuance
    ///
    /// Fails if the window does not fit in a timestamp.
    pub fn new(user: &User, expiration_minutes: u64) -> Result<Self, DomainError> {
        let now = Utc::now();
        let exp = i64::try_from(expiration_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|window| now.checked_add_signed(window))
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "Token expiration of {} minutes is out of range",
                    expiration_minutes
                ))
            })?;

        Ok(Self {
            sub: user.username().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Username the token was issued for
    pub fn username(&self) -> &str {
        &self.sub
    }

    /// Absolute expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Configuration for JWT service
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HS256 signing
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: u64,
}

impl JwtConfig {
    /// Placeholder secret used when none is configured
    pub const DEFAULT_SECRET: &'static str = "change-me-in-production";

    /// Create new JWT configuration
    pub fn new(secret: impl Into<String>, expiration_minutes: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes,
        }
    }

    /// Whether the development placeholder secret is in use
    pub fn uses_default_secret(&self) -> bool {
        self.secret == Self::DEFAULT_SECRET
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: Self::DEFAULT_SECRET.to_string(),
            expiration_minutes: 30,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a signed token for a user
    fn generate(&self, user: &User) -> Result<(String, JwtClaims), DomainError>;

    /// Validate a token's signature and expiry and return its claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service using a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration_minutes", &self.config.expiration_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<(String, JwtClaims), DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_minutes)?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok((token, claims))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::invalid_token(e.to_string()))?;

        if token_data.claims.sub.is_empty() {
            return Err(DomainError::invalid_token("missing subject"));
        }

        Ok(token_data.claims)
    }
}

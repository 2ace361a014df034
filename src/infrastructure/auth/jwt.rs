//! JWT token-pair signing

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::user::User;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    /// Create new claims for a user
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);

        Self {
            sub: user.id().as_str().to_string(),
            username: user.username().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    /// Check if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Get user ID from claims
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Configuration for the JWT signer
///
/// Secrets and expirations are injected here at construction; nothing is read
/// from ambient global state.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing access tokens
    pub access_secret: String,
    /// Secret key for signing refresh tokens
    pub refresh_secret: String,
    /// Access token expiration time in hours
    pub access_expiration_hours: u64,
    /// Refresh token expiration time in hours
    pub refresh_expiration_hours: u64,
}

impl JwtConfig {
    /// Create new JWT configuration
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_expiration_hours: u64,
        refresh_expiration_hours: u64,
    ) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_expiration_hours,
            refresh_expiration_hours,
        }
    }
}

/// Trait for issuing the access/refresh token pair
pub trait TokenSigner: Send + Sync + Debug {
    /// Sign an access token for a user
    fn sign_access(&self, user: &User) -> Result<String, DomainError>;

    /// Sign a refresh token for a user
    fn sign_refresh(&self, user: &User) -> Result<String, DomainError>;

    /// Access token lifetime in hours
    fn access_expiration_hours(&self) -> u64;

    /// Refresh token lifetime in hours
    fn refresh_expiration_hours(&self) -> u64;
}

/// JWT signer using HS256 with per-class secrets
#[derive(Clone)]
pub struct JwtTokenSigner {
    config: JwtConfig,
    access_key: EncodingKey,
    refresh_key: EncodingKey,
}

impl Debug for JwtTokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenSigner")
            .field("access_expiration_hours", &self.config.access_expiration_hours)
            .field("refresh_expiration_hours", &self.config.refresh_expiration_hours)
            .field("access_key", &"[hidden]")
            .field("refresh_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenSigner {
    /// Create a new signer with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let access_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());

        Self {
            config,
            access_key,
            refresh_key,
        }
    }

    fn sign(&self, user: &User, key: &EncodingKey, hours: u64) -> Result<String, DomainError> {
        let claims = JwtClaims::new(user, hours);

        encode(&Header::default(), &claims, key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }
}

impl TokenSigner for JwtTokenSigner {
    fn sign_access(&self, user: &User) -> Result<String, DomainError> {
        self.sign(user, &self.access_key, self.config.access_expiration_hours)
    }

    fn sign_refresh(&self, user: &User) -> Result<String, DomainError> {
        self.sign(user, &self.refresh_key, self.config.refresh_expiration_hours)
    }

    fn access_expiration_hours(&self) -> u64 {
        self.config.access_expiration_hours
    }

    fn refresh_expiration_hours(&self) -> u64 {
        self.config.refresh_expiration_hours
    }
}

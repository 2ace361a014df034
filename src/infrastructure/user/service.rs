//! Signup orchestration service

use std::sync::Arc;

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserRepository, validate_signup};

use super::password::PasswordHasher;

/// Request for creating a new user account
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Orchestrates account creation: validate, pre-check, hash, persist
#[derive(Debug)]
pub struct SignupService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> SignupService<R, H> {
    /// Create a new signup service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new user account
    ///
    /// The duplicate pre-check is a fast path only; the pre-check and create
    /// are not atomic, so the repository's create-time conflict signal is the
    /// authoritative uniqueness guarantee.
    pub async fn signup(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        validate_signup(
            &request.name,
            &request.username,
            &request.email,
            &request.password,
        )
        .map_err(|e| DomainError::validation(e.to_string()))?;

        if self
            .repository
            .find_by_identity(&request.email, &request.username)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "User with email '{}' or username '{}' already exists",
                request.email, request.username
            )));
        }

        let password_hash = self.hasher.hash(&request.password)?;

        self.repository
            .create(NewUser {
                name: request.name,
                username: request.username,
                email: request.email,
                password_hash,
            })
            .await
    }
}

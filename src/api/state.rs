//! Application state for shared services

use std::sync::Arc;

use crate::api::reporter::ErrorReporter;
use crate::domain::DomainError;
use crate::domain::user::User;
use crate::infrastructure::auth::TokenSigner;
use crate::infrastructure::user::{CreateUserRequest, PasswordHasher, SignupService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub signup_service: Arc<dyn SignupServiceTrait>,
    pub token_signer: Arc<dyn TokenSigner>,
    pub error_reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        signup_service: Arc<dyn SignupServiceTrait>,
        token_signer: Arc<dyn TokenSigner>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            signup_service,
            token_signer,
            error_reporter,
        }
    }
}

/// Trait for signup service operations
#[async_trait::async_trait]
pub trait SignupServiceTrait: Send + Sync {
    async fn signup(&self, request: CreateUserRequest) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R, H> SignupServiceTrait for SignupService<R, H>
where
    R: crate::domain::user::UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn signup(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        SignupService::signup(self, request).await
    }
}

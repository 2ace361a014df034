//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// `create` is the authoritative uniqueness check: it must fail with
/// `DomainError::Conflict` when the email or username is already taken, even
/// if an earlier `find_by_identity` returned nothing.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Find a user whose email or username matches
    async fn find_by_identity(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Persist a new user, assigning it a unique id
    async fn create(&self, new_user: NewUser) -> Result<User, DomainError>;
}

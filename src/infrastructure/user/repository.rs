//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::domain::user::{NewUser, User, UserId, UserRepository};

/// Users keyed by id, with email/username indexes for identity lookups.
/// Held behind a single lock so lookup and create never interleave.
#[derive(Debug, Default)]
struct Store {
    users: HashMap<String, User>,
    email_index: HashMap<String, String>,
    username_index: HashMap<String, String>,
}

impl Store {
    fn insert(&mut self, user: User) {
        let id = user.id().as_str().to_string();
        self.email_index.insert(user.email().to_string(), id.clone());
        self.username_index
            .insert(user.username().to_string(), id.clone());
        self.users.insert(id, user);
    }
}

/// In-memory implementation of UserRepository
///
/// Default storage backend; also the substrate for service-level tests.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let mut store = Store::default();
        for user in users {
            store.insert(user);
        }

        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_identity(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        let store = self.store.read().await;

        let user_id = store
            .email_index
            .get(email)
            .or_else(|| store.username_index.get(username));

        Ok(user_id.and_then(|id| store.users.get(id)).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut store = self.store.write().await;

        if store.email_index.contains_key(&new_user.email)
            || store.username_index.contains_key(&new_user.username)
        {
            return Err(DomainError::conflict(format!(
                "User with email '{}' or username '{}' already exists",
                new_user.email, new_user.username
            )));
        }

        let user = User::new(
            UserId::generate(),
            new_user.name,
            new_user.username,
            new_user.email,
            new_user.password_hash,
        );

        store.insert(user.clone());

        Ok(user)
    }
}

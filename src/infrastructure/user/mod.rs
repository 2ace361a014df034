//! User infrastructure module
//!
//! Implementations for account storage and credential handling: Argon2
//! password hashing, in-memory and PostgreSQL repositories, and the signup
//! service.

mod password;
mod postgres_repository;
mod repository;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, SignupService};

//! User Accounts API
//!
//! A small account-registration service:
//! - Signup with Argon2-hashed credentials
//! - Access/refresh JWT pair delivered as HttpOnly cookies
//! - Pluggable user storage (in-memory or PostgreSQL)

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use api::TracingErrorReporter;
use api::state::AppState;
use infrastructure::auth::{JwtConfig, JwtTokenSigner};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, SignupService,
};

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let hasher = Arc::new(Argon2Hasher::new());

    let signup_service: Arc<dyn api::state::SignupServiceTrait> =
        match config.storage.backend.as_str() {
            "postgres" => {
                let database_url = std::env::var("DATABASE_URL")
                    .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

                info!("Connecting to PostgreSQL...");
                let pool = sqlx::PgPool::connect(&database_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to connect to PostgreSQL: {}", e))?;
                info!("PostgreSQL connection established");

                Arc::new(SignupService::new(
                    Arc::new(PostgresUserRepository::new(pool)),
                    hasher,
                ))
            }
            _ => {
                info!("Using in-memory user storage");
                Arc::new(SignupService::new(
                    Arc::new(InMemoryUserRepository::new()),
                    hasher,
                ))
            }
        };

    let token_signer = Arc::new(JwtTokenSigner::new(jwt_config(config)));

    Ok(AppState::new(
        signup_service,
        token_signer,
        Arc::new(TracingErrorReporter::new()),
    ))
}

/// Build the signer configuration from config file, environment, or fallback
fn jwt_config(config: &AppConfig) -> JwtConfig {
    let access_secret = resolve_secret(
        config.auth.access_token_secret.clone(),
        "ACCESS_TOKEN_SECRET",
    );
    let refresh_secret = resolve_secret(
        config.auth.refresh_token_secret.clone(),
        "REFRESH_TOKEN_SECRET",
    );

    JwtConfig::new(
        access_secret,
        refresh_secret,
        config.auth.access_token_expiration_hours,
        config.auth.refresh_token_expiration_hours,
    )
}

fn resolve_secret(configured: Option<String>, env_var: &str) -> String {
    configured
        .or_else(|| std::env::var(env_var).ok())
        .unwrap_or_else(|| {
            tracing::warn!(
                "No {} configured. Generating random secret. \
                Issued tokens will NOT survive restarts.",
                env_var
            );
            generate_random_secret()
        })
}

/// Generate a random signing secret
fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_defaults_to_memory() {
        let state = create_app_state().await.unwrap();

        let user = state
            .signup_service
            .signup(infrastructure::user::CreateUserRequest {
                name: "Test User".to_string(),
                username: "testuser".to_string(),
                email: "test@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.username(), "testuser");

        let token = state.token_signer.sign_access(&user).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_generate_random_secret_length() {
        let secret = generate_random_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_random_secret());
    }
}

//! Authentication API endpoints
//!
//! Provides the signup endpoint: account creation with hashed credentials,
//! token-pair issuance, and HttpOnly cookie delivery.

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::DomainError;
use crate::domain::user::User;
use crate::infrastructure::user::CreateUserRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

/// Signup request body
///
/// Fields default to empty so an omitted field and an empty one are rejected
/// the same way, by validation rather than by body deserialization.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public profile returned on successful signup (safe to expose)
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl UserResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            name: user.name().to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Register a new user account
///
/// POST /api/auth/signup
///
/// Returns the public profile with the token pair set as HttpOnly cookies;
/// tokens never appear in the JSON body. Validation and duplicate-identity
/// failures map to fixed 400/409 responses; anything else goes to the
/// injected error reporter, which owns the final response.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Response {
    let result = state
        .signup_service
        .signup(CreateUserRequest {
            name: request.name,
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await;

    let user = match result {
        Ok(user) => user,
        Err(DomainError::Validation { .. }) => {
            return ApiError::bad_request("All fields are required").into_response();
        }
        Err(err) if err.is_conflict() => {
            return ApiError::conflict("Email or username already taken").into_response();
        }
        Err(err) => return state.error_reporter.report(err),
    };

    let access_token = match state.token_signer.sign_access(&user) {
        Ok(token) => token,
        Err(err) => return state.error_reporter.report(err),
    };

    let refresh_token = match state.token_signer.sign_refresh(&user) {
        Ok(token) => token,
        Err(err) => return state.error_reporter.report(err),
    };

    let cookies = [
        auth_cookie(
            "accessToken",
            &access_token,
            state.token_signer.access_expiration_hours(),
        ),
        auth_cookie(
            "refreshToken",
            &refresh_token,
            state.token_signer.refresh_expiration_hours(),
        ),
    ];

    let mut response =
        (StatusCode::CREATED, Json(UserResponse::from_user(&user))).into_response();

    for cookie in cookies {
        match cookie {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => return state.error_reporter.report(err),
        }
    }

    response
}

/// Build an HttpOnly auth cookie header value
fn auth_cookie(name: &str, value: &str, hours: u64) -> Result<HeaderValue, DomainError> {
    let max_age = hours * 3600;

    HeaderValue::from_str(&format!(
        "{name}={value}; Path=/; Max-Age={max_age}; HttpOnly; SameSite=Strict"
    ))
    .map_err(|e| DomainError::internal(format!("Failed to build cookie header: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::reporter::TracingErrorReporter;
    use crate::api::router::create_router_with_state;
    use crate::domain::user::{MockUserRepository, UserId};
    use crate::infrastructure::auth::{JwtConfig, JwtTokenSigner, TokenSigner};
    use crate::infrastructure::user::{Argon2Hasher, SignupService};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const ACCESS_SECRET: &str = "test-access-secret";
    const REFRESH_SECRET: &str = "test-refresh-secret";

    /// Signer wrapper that counts per-class signing calls
    #[derive(Debug)]
    struct CountingSigner {
        inner: JwtTokenSigner,
        access_calls: AtomicUsize,
        refresh_calls: AtomicUsize,
    }

    impl CountingSigner {
        fn new() -> Self {
            Self {
                inner: JwtTokenSigner::new(JwtConfig::new(ACCESS_SECRET, REFRESH_SECRET, 1, 168)),
                access_calls: AtomicUsize::new(0),
                refresh_calls: AtomicUsize::new(0),
            }
        }
    }

    impl TokenSigner for CountingSigner {
        fn sign_access(&self, user: &User) -> Result<String, DomainError> {
            self.access_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.sign_access(user)
        }

        fn sign_refresh(&self, user: &User) -> Result<String, DomainError> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.sign_refresh(user)
        }

        fn access_expiration_hours(&self) -> u64 {
            self.inner.access_expiration_hours()
        }

        fn refresh_expiration_hours(&self) -> u64 {
            self.inner.refresh_expiration_hours()
        }
    }

    struct TestApp {
        state: AppState,
        repository: Arc<MockUserRepository>,
        signer: Arc<CountingSigner>,
    }

    fn test_app() -> TestApp {
        let repository = Arc::new(MockUserRepository::new());
        let signer = Arc::new(CountingSigner::new());
        let service = SignupService::new(repository.clone(), Arc::new(Argon2Hasher::new()));

        let state = AppState::new(
            Arc::new(service),
            signer.clone(),
            Arc::new(TracingErrorReporter::new()),
        );

        TestApp {
            state,
            repository,
            signer,
        }
    }

    async fn post_signup(state: AppState, body: serde_json::Value) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let app = create_router_with_state(state);

        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/signup")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap();

        (status, headers, json)
    }

    fn full_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Dhwani",
            "username": "Dhwani",
            "email": "ddobariya@gmail.com",
            "password": "123456"
        })
    }

    fn set_cookies(headers: &axum::http::HeaderMap) -> Vec<String> {
        headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_signup_success_returns_profile_and_cookies() {
        let app = test_app();

        let (status, headers, body) = post_signup(app.state.clone(), full_body()).await;

        assert_eq!(status, StatusCode::CREATED);

        // Body is exactly the public profile: id plus the submitted fields.
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(!body["id"].as_str().unwrap().is_empty());
        assert_eq!(body["name"], "Dhwani");
        assert_eq!(body["username"], "Dhwani");
        assert_eq!(body["email"], "ddobariya@gmail.com");

        let cookies = set_cookies(&headers);
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
        assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
        assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

        assert_eq!(app.signer.access_calls.load(Ordering::SeqCst), 1);
        assert_eq!(app.signer.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signup_tokens_never_in_body() {
        let app = test_app();

        let (_, headers, body) = post_signup(app.state.clone(), full_body()).await;

        let cookies = set_cookies(&headers);
        let access_value = cookies
            .iter()
            .find(|c| c.starts_with("accessToken="))
            .and_then(|c| c.split(';').next())
            .and_then(|pair| pair.strip_prefix("accessToken="))
            .unwrap()
            .to_string();

        let body_text = body.to_string();
        assert!(!body_text.contains(&access_value));
        assert!(!body_text.contains("accessToken"));
        assert!(!body_text.contains("refreshToken"));
        assert!(!body_text.contains("password"));
    }

    #[tokio::test]
    async fn test_signup_cookie_token_is_bound_to_user() {
        use crate::infrastructure::auth::JwtClaims;
        use jsonwebtoken::{DecodingKey, Validation, decode};

        let app = test_app();

        let (_, headers, body) = post_signup(app.state.clone(), full_body()).await;

        let cookies = set_cookies(&headers);
        let token = cookies
            .iter()
            .find(|c| c.starts_with("accessToken="))
            .and_then(|c| c.split(';').next())
            .and_then(|pair| pair.strip_prefix("accessToken="))
            .unwrap()
            .to_string();

        let claims = decode::<JwtClaims>(
            &token,
            &DecodingKey::from_secret(ACCESS_SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap()
        .claims;

        assert_eq!(claims.sub, body["id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn test_signup_missing_field_rejected() {
        for field in ["name", "username", "email", "password"] {
            let app = test_app();

            let mut body = full_body();
            body.as_object_mut().unwrap().remove(field);

            let (status, _, response) = post_signup(app.state.clone(), body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response,
                serde_json::json!({ "error": "All fields are required" })
            );
            assert_eq!(app.repository.create_calls(), 0);
            assert_eq!(app.signer.access_calls.load(Ordering::SeqCst), 0);
            assert_eq!(app.signer.refresh_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_signup_empty_field_rejected() {
        let app = test_app();

        let mut body = full_body();
        body["password"] = serde_json::json!("");

        let (status, _, response) = post_signup(app.state.clone(), body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response,
            serde_json::json!({ "error": "All fields are required" })
        );
    }

    #[tokio::test]
    async fn test_signup_existing_identity_conflicts() {
        let app = test_app();
        app.repository
            .insert_users(vec![User::new(
                UserId::generate(),
                "Existing",
                "someone-else",
                "ddobariya@gmail.com",
                "hash",
            )])
            .await;

        let (status, _, response) = post_signup(app.state.clone(), full_body()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            response,
            serde_json::json!({ "error": "Email or username already taken" })
        );
        assert_eq!(app.signer.access_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_signup_create_time_conflict_is_authoritative() {
        // Pre-check passes (repository empty) but create reports a duplicate.
        let app = test_app();
        app.repository.set_conflict_on_create(true);

        let (status, _, response) = post_signup(app.state.clone(), full_body()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            response,
            serde_json::json!({ "error": "Email or username already taken" })
        );
    }

    #[tokio::test]
    async fn test_signup_unclassified_failure_goes_to_reporter() {
        // Pre-check succeeds; the create itself fails without a conflict signal.
        let app = test_app();
        app.repository.set_fail_on_create(true);

        let (status, headers, response) = post_signup(app.state.clone(), full_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response, serde_json::json!({ "error": "server error" }));
        assert!(set_cookies(&headers).is_empty());
        assert_eq!(app.signer.access_calls.load(Ordering::SeqCst), 0);
    }
}

//! Unclassified-failure reporting
//!
//! Failures the signup flow does not classify (storage outages, signer
//! failures) are handed to an injected reporter, which owns the final
//! response. Handlers never invent their own generic failure responses.

use axum::response::{IntoResponse, Response};
use std::fmt::Debug;

use crate::api::types::ApiError;
use crate::domain::DomainError;

/// Receives unclassified failures and translates them to a response
pub trait ErrorReporter: Send + Sync + Debug {
    fn report(&self, error: DomainError) -> Response;
}

/// Reporter that logs the failure and answers with a generic 500
#[derive(Debug, Clone, Default)]
pub struct TracingErrorReporter;

impl TracingErrorReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, error: DomainError) -> Response {
        tracing::error!(error = %error, "unhandled failure in request handling");

        ApiError::internal("server error").into_response()
    }
}

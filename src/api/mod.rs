//! API layer - HTTP endpoints and shared state

pub mod auth;
pub mod health;
pub mod reporter;
pub mod router;
pub mod state;
pub mod types;

pub use reporter::{ErrorReporter, TracingErrorReporter};
pub use router::{create_router, create_router_with_state};
pub use state::AppState;

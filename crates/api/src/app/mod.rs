//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: storage backend selection and service construction
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use catalog_auth::JwtValidator;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

pub use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Bearer tokens are checked against the same issuer that signs them.
pub fn build_app(services: Arc<AppServices>) -> Router {
    let jwt: Arc<dyn JwtValidator> = services.accounts.issuer().clone();
    let auth_state = middleware::AuthState { jwt };

    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services)),
        )
}

use axum::{Router, routing::get};

pub mod products;
pub mod system;
pub mod users;

/// Endpoints reachable without a bearer token.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/users", users::router())
}

/// Endpoints behind the auth middleware.
pub fn protected_router() -> Router {
    Router::new().nest("/products", products::router())
}

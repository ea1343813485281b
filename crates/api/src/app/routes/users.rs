use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_user))
        .route("/generate-token", post(generate_token))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateUserRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services
        .accounts
        .register(body.name, body.email, body.password)
        .await
    {
        Ok(user) => (StatusCode::CREATED, Json(dto::user_to_json(&user))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn generate_token(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::GetJwtRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.accounts.login(&body.email, body.password).await {
        Ok(token) => Json(dto::GetJwtResponse {
            access_token: token.token,
        })
        .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use catalog_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>()
        .map_err(errors::domain_error_to_response)
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.catalog.create_product(body.name, body.price).await {
        Ok(product) => {
            tracing::debug!(
                product_id = %product.id_typed(),
                user_id = %principal.user_id(),
                "product created via api"
            );
            (
                StatusCode::CREATED,
                Json(serde_json::json!({ "id": product.id_typed().to_string() })),
            )
                .into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListProductsParams>,
) -> axum::response::Response {
    match services.catalog.list_products(params.to_query()).await {
        Ok(products) => {
            let body: Vec<_> = products.iter().map(dto::product_to_json).collect();
            Json(body).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.get_product(id).await {
        Ok(product) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services
        .catalog
        .update_product(id, body.name, body.price)
        .await
    {
        Ok(product) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.delete_product(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use catalog_auth::JwtValidator;

use crate::app::errors::json_error;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer(req.headers()) else {
        return unauthorized();
    };

    let claims = match state.jwt.validate(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "bearer token rejected");
            return unauthorized();
        }
    };

    req.extensions_mut().insert(PrincipalContext::new(claims.sub));

    next.run(req).await
}

/// One log line per request with method, path, status and latency.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

fn unauthorized() -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unauthorized",
        "missing or invalid bearer token",
    )
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }
    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_str(value).unwrap(),
        );
        h
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
    }

    #[test]
    fn malformed_authorization_is_ignored() {
        assert_eq!(extract_bearer(&HeaderMap::new()), None);
        assert_eq!(extract_bearer(&headers("Basic dXNlcjpwdw==")), None);
        assert_eq!(extract_bearer(&headers("Bearer    ")), None);
    }
}

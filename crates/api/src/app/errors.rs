use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        ServiceError::Conflict(msg) => {
            tracing::debug!(detail = %msg, "conflict");
            json_error(StatusCode::CONFLICT, "conflict", "resource already exists")
        }
        ServiceError::Token(e) => internal("token_error", e),
        ServiceError::Storage(msg) => internal("storage_error", msg),
        ServiceError::Internal(msg) => internal("internal_error", msg),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    if err.is_validation() {
        return json_error(StatusCode::BAD_REQUEST, err.code(), err.to_string());
    }
    match err {
        DomainError::CredentialInvalid => {
            json_error(StatusCode::UNAUTHORIZED, err.code(), err.to_string())
        }
        other => internal(other.code(), other),
    }
}

/// Malformed or missing JSON bodies.
pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
}

fn internal(code: &'static str, detail: impl std::fmt::Display) -> axum::response::Response {
    tracing::error!(error = %detail, code, "request failed");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        "internal server error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (ServiceError::Domain(DomainError::NameRequired), StatusCode::BAD_REQUEST),
            (ServiceError::Domain(DomainError::invalid_id("ProductId: bad")), StatusCode::BAD_REQUEST),
            (ServiceError::Domain(DomainError::CredentialInvalid), StatusCode::UNAUTHORIZED),
            (ServiceError::Domain(DomainError::hashing("bad params")), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::NotFound, StatusCode::NOT_FOUND),
            (ServiceError::Conflict("users_email_key".into()), StatusCode::CONFLICT),
            (ServiceError::Storage("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(service_error_to_response(err).status(), status);
        }
    }
}

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::AppError;
use catalog_infra::external::ExternalApiError;
use catalog_infra::repository::RepositoryError;

pub fn app_error_to_response(err: AppError) -> axum::response::Response {
    match err {
        AppError::Domain(e) => domain_error_to_response(e),
        AppError::Repository(RepositoryError::Conflict(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg)
        }
        AppError::Repository(RepositoryError::Unavailable) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "unavailable",
            "store unavailable",
        ),
        AppError::Repository(e @ RepositoryError::Database(_)) => {
            tracing::error!("repository failure: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string())
        }
        AppError::External(ExternalApiError::InvalidEndpoint(endpoint)) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_endpoint",
            format!("invalid endpoint: {endpoint}"),
        ),
        AppError::External(e) => json_error(StatusCode::BAD_GATEWAY, "upstream_error", e.to_string()),
        AppError::Mediator(e) => {
            tracing::error!("request routing failed: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
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
    use catalog_mediator::MediatorError;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::from(DomainError::validation("name")), StatusCode::BAD_REQUEST),
            (AppError::from(DomainError::invalid_id("x")), StatusCode::BAD_REQUEST),
            (AppError::not_found(), StatusCode::NOT_FOUND),
            (
                AppError::from(RepositoryError::Conflict("dup".into())),
                StatusCode::CONFLICT,
            ),
            (AppError::from(RepositoryError::Unavailable), StatusCode::SERVICE_UNAVAILABLE),
            (
                AppError::from(RepositoryError::Database("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::from(ExternalApiError::InvalidEndpoint("..".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::from(ExternalApiError::Status {
                    status: 404,
                    body: String::new(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::from(MediatorError::HandlerNotFound("X")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(app_error_to_response(err).status(), expected);
        }
    }
}

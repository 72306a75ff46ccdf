//! Shared HTTP plumbing: the response envelope and validated JSON input

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Uniform response envelope.
///
/// Every endpoint answers with `status_code` mirroring the HTTP status,
/// a human-readable `message`, and an optional `data` payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn message_only(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

/// HTTP status for a domain error.
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) | DomainError::Conflict(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::StoreUnavailable(_) | DomainError::Unexpected(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Envelope for a failed operation.
///
/// Store/internal failures are logged with their detail and answered
/// with a generic message; the detail never reaches the caller.
pub fn domain_error_response<T>(error: &DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(error);
    let message = match error {
        DomainError::StoreUnavailable(detail) => {
            tracing::error!(detail = %detail, "store unavailable");
            "Store temporarily unavailable, please retry".to_string()
        }
        DomainError::Unexpected(detail) => {
            tracing::error!(detail = %detail, "unexpected error");
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };
    (
        status,
        Json(ApiResponse::message_only(status, message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_mirrors_http_status() {
        let ok = ApiResponse::ok("done", 42);
        assert_eq!(ok.status_code, 200);
        assert_eq!(ok.data, Some(42));

        let not_found = ApiResponse::<()>::message_only(StatusCode::NOT_FOUND, "missing");
        assert_eq!(not_found.status_code, 404);
        let json = serde_json::to_value(&not_found).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn internal_detail_never_reaches_the_caller() {
        let err = DomainError::Unexpected("database error: stack trace here".into());
        let (status, body) = domain_error_response::<()>(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.0.message.contains("stack trace"));
    }

    #[test]
    fn error_kinds_map_to_expected_statuses() {
        assert_eq!(
            status_for(&DomainError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Conflict("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_for(&DomainError::NotFound {
                entity: "User",
                field: "id",
                value: "1".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&DomainError::StoreUnavailable("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

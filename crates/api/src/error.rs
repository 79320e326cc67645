//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hotelres_db::ServiceError;
use hotelres_shared::{AppError, FieldError};
use serde::Serialize;
use tracing::error;

/// Error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine readable code.
    pub error: &'static str,
    /// Human readable message.
    pub message: String,
    /// Per-field validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// An [`AppError`] on its way to the client.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with a message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 401 with a message.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with a message.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.error_code();

        let (message, fields) = match err {
            ref e if e.is_internal() => {
                error!(error = %e, "Request failed");
                ("An internal error occurred".to_string(), None)
            }
            AppError::InvalidFields(fields) => ("Invalid input".to_string(), Some(fields)),
            AppError::Identity(messages) => (messages.join(" "), None),
            AppError::Unauthorized(m)
            | AppError::Forbidden(m)
            | AppError::NotFound(m)
            | AppError::Validation(m)
            | AppError::Conflict(m)
            | AppError::Database(m)
            | AppError::Storage(m)
            | AppError::Internal(m) => (m, None),
        };

        (
            status,
            Json(ErrorBody {
                error: code,
                message,
                fields,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_of(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("json"))
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_of(ServiceError::NotFound("room").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "room not found");
        assert!(body.get("fields").is_none());
    }

    #[tokio::test]
    async fn test_internal_message_is_hidden() {
        let (status, body) =
            body_of(ApiError(AppError::Database("connection refused".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn test_field_errors_are_listed() {
        let err = ApiError(AppError::InvalidFields(vec![FieldError::new(
            "count",
            "count must be between 1 and 100",
        )]));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "count");
    }

    #[tokio::test]
    async fn test_identity_messages_are_joined() {
        let err = ApiError(AppError::Identity(vec![
            "Passwords must be at least 6 characters.".into(),
            "Passwords must have at least one digit ('0'-'9').".into(),
        ]));
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap_or_default().contains("digit"));
    }
}

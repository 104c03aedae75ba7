//! HTTP error mapping for the action server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::actions::ActionError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No registered action named {0}")]
    UnknownAction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Body shape for every error response: `{"error": {"code", "message"}}`.
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::UnknownAction(name) => {
                tracing::warn!(action = %name, "request for unregistered action");
                (
                    StatusCode::NOT_FOUND,
                    "UNKNOWN_ACTION",
                    format!("No registered action named {name}"),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<ActionError> for ApiError {
    fn from(err: ActionError) -> Self {
        match err {
            ActionError::UnknownAction(name) => ApiError::UnknownAction(name),
            ActionError::StoreDiverged(key) => {
                ApiError::Internal(format!("reference store missing key {key}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn unknown_action_maps_to_404() {
        let response = ApiError::UnknownAction("action_x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_ACTION");
        assert_eq!(body["error"]["message"], "No registered action named action_x");
    }

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let response = ApiError::Internal("store missing key tos".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INTERNAL");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }

    #[test]
    fn action_errors_convert() {
        let err: ApiError = ActionError::UnknownAction("a".to_string()).into();
        assert!(matches!(err, ApiError::UnknownAction(name) if name == "a"));

        let err: ApiError = ActionError::StoreDiverged("tos".to_string()).into();
        assert!(matches!(err, ApiError::Internal(detail) if detail.contains("tos")));
    }
}

use axum::{http::StatusCode, response::Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Payment signature mismatch")]
    SignatureMismatch,
    #[error("Payment gateway error: {0}")]
    Gateway(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {field}"),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::SignatureMismatch => (
                StatusCode::BAD_REQUEST,
                "Payment signature mismatch".to_string(),
            ),
            ApiError::Gateway(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

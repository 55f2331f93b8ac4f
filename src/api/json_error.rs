use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map};
use validator::ValidationErrors;

use crate::error::error_body;

/// Rejection produced by [`super::validated_json::ValidatedJson`].
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Validation error")]
    ValidationError(ValidationErrors),
}

impl IntoResponse for JsonError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson(rejection) => {
                let body = error_body("invalid_json", rejection.body_text(), Map::new());
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut extra = Map::new();
                extra.insert("errors".to_owned(), json!(errors));
                let body = error_body("validation_error", "Request validation failed", extra);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::catalog::CourseTier;

pub type AdmissionsResult<T> = Result<T, AdmissionsError>;

/// Every failure a request can end in.
///
/// Each variant maps to a stable `error` kind in the JSON body, so clients can
/// branch on the kind and show `detail` to the user.
#[derive(Debug, Error)]
pub enum AdmissionsError {
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Expired(String),
    #[error("Invalid OTP")]
    InvalidOtp {
        email: Option<String>,
        phone: Option<String>,
    },
    #[error("Both email and phone must be verified before setting a password")]
    VerificationPending,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0}")]
    WeakPassword(String),
    #[error("{detail}")]
    IncompatibleSelection { field: CourseTier, detail: String },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AdmissionsError {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Conflict(_) => "conflict",
            Self::NotFound(_) => "not_found",
            Self::Expired(_) => "expired",
            Self::InvalidOtp { .. } => "invalid_otp",
            Self::VerificationPending => "verification_pending",
            Self::PasswordMismatch => "password_mismatch",
            Self::WeakPassword(_) => "weak_password",
            Self::IncompatibleSelection { .. } => "incompatible_selection",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::Database(_) | Self::Internal(_) => "internal_error",
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Expired(_) => StatusCode::GONE,
            Self::InvalidOtp { .. }
            | Self::VerificationPending
            | Self::PasswordMismatch
            | Self::WeakPassword(_)
            | Self::IncompatibleSelection { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn internal(error: impl std::fmt::Display) -> Self {
        Self::Internal(error.to_string())
    }
}

/// Builds the `{error, detail, ...}` body shared by every error response.
pub fn error_body(kind: &str, detail: impl Into<String>, extra: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("error".to_owned(), Value::from(kind));
    body.insert("detail".to_owned(), Value::from(detail.into()));
    body.extend(extra);
    Value::Object(body)
}

impl IntoResponse for AdmissionsError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let mut extra = Map::new();

        let detail = match &self {
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!("Request failed: {self}");
                "Internal server error".to_owned()
            }
            Self::InvalidOtp { email, phone } => {
                if let Some(message) = email {
                    extra.insert("email_otp_error".to_owned(), json!(message));
                }
                if let Some(message) = phone {
                    extra.insert("phone_otp_error".to_owned(), json!(message));
                }
                self.to_string()
            }
            Self::IncompatibleSelection { field, .. } => {
                extra.insert("field".to_owned(), json!(field));
                self.to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(error_body(kind, detail, extra))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        let conflict = AdmissionsError::Conflict("taken".into());
        assert_eq!(conflict.kind(), "conflict");
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let expired = AdmissionsError::Expired("gone".into());
        assert_eq!(expired.status(), StatusCode::GONE);

        let db = AdmissionsError::from(DbErr::Custom("boom".into()));
        assert_eq!(db.kind(), "internal_error");
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_carries_kind_detail_and_extras() {
        let mut extra = Map::new();
        extra.insert("field".to_owned(), json!("major"));

        let body = error_body("incompatible_selection", "nope", extra);

        assert_eq!(
            body,
            json!({"error": "incompatible_selection", "detail": "nope", "field": "major"})
        );
    }
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;
use serde_json::json;

pub async fn ok() -> StatusCode {
    StatusCode::OK
}

/// Ready once the store answers a ping.
pub async fn readiness(State(db): State<DatabaseConnection>) -> StatusCode {
    match db.ping().await {
        Ok(()) => StatusCode::OK,
        Err(error) => {
            tracing::warn!("Readiness check failed: {error}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

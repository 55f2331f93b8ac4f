use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::ValidatedJson,
    app::App,
    error::AdmissionsResult,
    registration::{self, otp, session_store, NewRegistration},
    validation::{validate_not_blank, validate_phone},
};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(max = 50), custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[validate(length(max = 50), custom(function = "validate_not_blank"))]
    pub last_name: String,
}

pub async fn register(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AdmissionsResult<(StatusCode, Json<Value>)> {
    let session = session_store::start(
        &app,
        NewRegistration {
            email: payload.email,
            phone: payload.phone,
            first_name: payload.first_name,
            last_name: payload.last_name,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "session_id": session.id,
            "detail": "Verification codes sent to your email and phone",
        })),
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    pub session_id: Uuid,
    /// May be left out once that channel is verified.
    #[serde(default)]
    #[validate(length(max = 12))]
    pub email_otp: Option<String>,
    #[serde(default)]
    #[validate(length(max = 12))]
    pub phone_otp: Option<String>,
}

pub async fn verify_otp(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<VerifyOtpRequest>,
) -> AdmissionsResult<Json<Value>> {
    otp::verify(
        &app.db,
        payload.session_id,
        payload.email_otp.as_deref().unwrap_or_default(),
        payload.phone_otp.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(Json(json!({ "detail": "Email and phone verified" })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResendOtpRequest {
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
}

pub async fn resend_otp(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<ResendOtpRequest>,
) -> AdmissionsResult<Json<Value>> {
    let session = otp::resend(&app, &payload.email, &payload.phone).await?;

    Ok(Json(json!({
        "detail": "New verification codes sent",
        "session_id": session.id,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    pub session_id: Uuid,
    #[validate(length(max = 128))]
    pub password: String,
    pub confirm_password: String,
}

pub async fn set_password(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<SetPasswordRequest>,
) -> AdmissionsResult<(StatusCode, Json<Value>)> {
    let account = registration::finalize(
        &app.db,
        &app.config,
        payload.session_id,
        &payload.password,
        &payload.confirm_password,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "detail": "Registration complete",
            "account": account,
        })),
    ))
}

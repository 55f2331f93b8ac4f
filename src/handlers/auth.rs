use axum::{extract::State, Json};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    api::ValidatedJson,
    app::App,
    auth::{generate_token, verify_token, CurrentUser, TokenKind},
    database::models::account,
    error::{AdmissionsError, AdmissionsResult},
    password::{verify_dummy_password, verify_password},
    registration::session_store::normalize_email,
    validation::validate_not_blank,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

fn invalid_credentials() -> AdmissionsError {
    AdmissionsError::Unauthorized("Invalid email or password".to_owned())
}

pub async fn login(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AdmissionsResult<Json<Value>> {
    let account = account::Entity::find()
        .filter(account::Column::Email.eq(normalize_email(&payload.email)))
        .one(&app.db)
        .await?
        .filter(|account| account.is_active);
    let Some(account) = account else {
        verify_dummy_password(&payload.password);
        return Err(invalid_credentials());
    };

    let valid = verify_password(&payload.password, &account.password_hash)
        .map_err(AdmissionsError::internal)?;
    if !valid {
        tracing::warn!("Failed login for account {}", account.id);
        return Err(invalid_credentials());
    }

    let access_token = generate_token(&app.config.jwt, account.id, TokenKind::Access)
        .map_err(AdmissionsError::internal)?;
    let refresh_token = generate_token(&app.config.jwt, account.id, TokenKind::Refresh)
        .map_err(AdmissionsError::internal)?;

    Ok(Json(json!({
        "access_token": access_token,
        "refresh_token": refresh_token,
        "account": account,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh(
    State(app): State<App>,
    ValidatedJson(payload): ValidatedJson<RefreshRequest>,
) -> AdmissionsResult<Json<Value>> {
    let invalid =
        || AdmissionsError::Unauthorized("Refresh token is invalid or expired".to_owned());

    let claims = verify_token(&app.config.jwt, &payload.refresh_token, TokenKind::Refresh)
        .map_err(|_| invalid())?;
    let account_id = claims.account_id().map_err(|_| invalid())?;

    let account = account::Entity::find_by_id(account_id)
        .one(&app.db)
        .await?
        .filter(|account| account.is_active)
        .ok_or_else(invalid)?;

    let access_token = generate_token(&app.config.jwt, account.id, TokenKind::Access)
        .map_err(AdmissionsError::internal)?;

    Ok(Json(json!({ "access_token": access_token })))
}

pub async fn me(current_user: CurrentUser) -> Json<account::Model> {
    Json(current_user.account)
}

/// Only the name is editable; email and phone are fixed at registration.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(max = 50), custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[validate(length(max = 50), custom(function = "validate_not_blank"))]
    pub last_name: String,
}

pub async fn update_me(
    State(app): State<App>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<UpdateMeRequest>,
) -> AdmissionsResult<Json<account::Model>> {
    let mut model = current_user.account.into_active_model();
    model.first_name = Set(payload.first_name.trim().to_owned());
    model.last_name = Set(payload.last_name.trim().to_owned());

    Ok(Json(model.update(&app.db).await?))
}

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait, IntoActiveModel};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::ValidatedJson,
    app::App,
    auth::StaffUser,
    course_selection::{resolver::paise_to_rupees, service},
    database::models::account,
    error::{AdmissionsError, AdmissionsResult},
};

pub async fn mark_fee_paid(
    State(app): State<App>,
    StaffUser(staff): StaffUser,
    Path(account_id): Path<Uuid>,
) -> AdmissionsResult<Json<Value>> {
    let application = service::mark_paid(&app.db, account_id).await?;
    tracing::info!("Staff {} marked fee paid for {account_id}", staff.id);

    Ok(Json(json!({
        "account_id": application.account_id,
        "fee_amount": paise_to_rupees(application.fee_amount),
        "is_fee_paid": application.is_fee_paid,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdmissionRequest {
    pub is_admitted: bool,
}

/// Admits or un-admits an applicant.
///
/// `admission_date` is stamped on the first admission and kept when the
/// decision is repeated; withdrawing the admission clears it.
pub async fn set_admission(
    State(app): State<App>,
    StaffUser(staff): StaffUser,
    Path(account_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<AdmissionRequest>,
) -> AdmissionsResult<Json<account::Model>> {
    let account = account::Entity::find_by_id(account_id)
        .one(&app.db)
        .await?
        .ok_or_else(|| AdmissionsError::NotFound(format!("Account {account_id} not found")))?;

    if account.is_admitted == payload.is_admitted {
        return Ok(Json(account));
    }

    let mut model = account.into_active_model();
    model.is_admitted = Set(payload.is_admitted);
    model.admission_date = Set(payload.is_admitted.then(Utc::now));
    let account = model.update(&app.db).await?;

    tracing::info!(
        "Staff {} set admission of {account_id} to {}",
        staff.id,
        account.is_admitted
    );

    Ok(Json(account))
}

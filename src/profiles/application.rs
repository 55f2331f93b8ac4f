use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    api::unique_constraint::handle_unique_constraint_violation,
    database::models::application_profile::{self, Gender},
    error::{AdmissionsError, AdmissionsResult},
    validation::{validate_aadhaar, validate_phone},
};

/// Every editable field of the application profile. Absent fields are stored
/// as null.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_application"))]
pub struct ApplicationProfileInput {
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    #[validate(length(max = 255))]
    pub profile_picture: Option<String>,
    pub aadhaar_number: Option<String>,
    #[validate(length(max = 255))]
    pub aadhaar_certificate: Option<String>,
    #[validate(length(max = 1000))]
    pub current_address: Option<String>,
    #[validate(length(max = 1000))]
    pub permanent_address: Option<String>,
    #[validate(length(max = 100))]
    pub father_name: Option<String>,
    pub father_phone: Option<String>,
    #[validate(length(max = 100))]
    pub father_occupation: Option<String>,
    #[validate(length(max = 100))]
    pub mother_name: Option<String>,
    pub mother_phone: Option<String>,
    #[validate(length(max = 100))]
    pub mother_occupation: Option<String>,
    #[validate(length(max = 100))]
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    #[validate(length(max = 100))]
    pub guardian_occupation: Option<String>,
    #[validate(length(max = 50))]
    pub caste: Option<String>,
    #[validate(length(max = 255))]
    pub caste_certificate: Option<String>,
    #[serde(default)]
    pub is_ews: bool,
    #[validate(length(max = 255))]
    pub ews_certificate: Option<String>,
    #[serde(default)]
    pub is_disabled: bool,
    #[validate(length(max = 255))]
    pub disability_certificate: Option<String>,
}

fn validate_application(input: &ApplicationProfileInput) -> Result<(), ValidationError> {
    for phone in [
        &input.father_phone,
        &input.mother_phone,
        &input.guardian_phone,
    ]
    .into_iter()
    .flatten()
    {
        validate_phone(phone)?;
    }

    if let Some(aadhaar) = &input.aadhaar_number {
        validate_aadhaar(aadhaar)?;
    }

    if input
        .date_of_birth
        .is_some_and(|born| born > Utc::now().date_naive())
    {
        return Err(ValidationError::new("date_of_birth")
            .with_message("Date of birth cannot be in the future".into()));
    }

    Ok(())
}

async fn find(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<application_profile::Model> {
    application_profile::Entity::find()
        .filter(application_profile::Column::AccountId.eq(account_id))
        .one(db)
        .await?
        .ok_or_else(|| AdmissionsError::NotFound("Application profile not found".to_owned()))
}

pub async fn get(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<application_profile::Model> {
    find(db, account_id).await
}

/// Overwrites every editable field. `application_id` and the owner never change.
pub async fn replace(
    db: &DatabaseConnection,
    account_id: Uuid,
    input: ApplicationProfileInput,
) -> AdmissionsResult<application_profile::Model> {
    let mut model = find(db, account_id).await?.into_active_model();

    model.date_of_birth = Set(input.date_of_birth);
    model.gender = Set(input.gender);
    model.profile_picture = Set(input.profile_picture);
    model.aadhaar_number = Set(input.aadhaar_number.map(|n| n.trim().to_owned()));
    model.aadhaar_certificate = Set(input.aadhaar_certificate);
    model.current_address = Set(input.current_address);
    model.permanent_address = Set(input.permanent_address);
    model.father_name = Set(input.father_name);
    model.father_phone = Set(input.father_phone);
    model.father_occupation = Set(input.father_occupation);
    model.mother_name = Set(input.mother_name);
    model.mother_phone = Set(input.mother_phone);
    model.mother_occupation = Set(input.mother_occupation);
    model.guardian_name = Set(input.guardian_name);
    model.guardian_phone = Set(input.guardian_phone);
    model.guardian_occupation = Set(input.guardian_occupation);
    model.caste = Set(input.caste);
    model.caste_certificate = Set(input.caste_certificate);
    model.is_ews = Set(input.is_ews);
    model.ews_certificate = Set(input.ews_certificate);
    model.is_disabled = Set(input.is_disabled);
    model.disability_certificate = Set(input.disability_certificate);

    let updated = model
        .update(db)
        .await
        .map_err(handle_unique_constraint_violation(
            "aadhaar_number",
            "aadhaar_number",
        ))?;

    tracing::info!("Application profile {} updated", updated.application_id);

    Ok(updated)
}

use axum::{extract::State, Json};

use crate::{
    api::ValidatedJson,
    app::App,
    auth::CurrentUser,
    database::models::{application_profile, education_profile},
    error::{AdmissionsError, AdmissionsResult},
    profiles::{application, education, ApplicationProfileInput, EducationProfileInput},
};

pub async fn show_application(
    State(app): State<App>,
    current_user: CurrentUser,
) -> AdmissionsResult<Json<application_profile::Model>> {
    Ok(Json(application::get(&app.db, current_user.id).await?))
}

pub async fn replace_application(
    State(app): State<App>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<ApplicationProfileInput>,
) -> AdmissionsResult<Json<application_profile::Model>> {
    Ok(Json(
        application::replace(&app.db, current_user.id, payload).await?,
    ))
}

pub async fn show_education(
    State(app): State<App>,
    current_user: CurrentUser,
) -> AdmissionsResult<Json<education_profile::Model>> {
    Ok(Json(education::get(&app.db, current_user.id).await?))
}

pub async fn replace_education(
    State(app): State<App>,
    current_user: CurrentUser,
    ValidatedJson(payload): ValidatedJson<EducationProfileInput>,
) -> AdmissionsResult<Json<education_profile::Model>> {
    Ok(Json(
        education::replace(&app.db, current_user.id, payload).await?,
    ))
}

/// Profiles are created with the account, so creating another is a conflict.
pub async fn create_exists(_current_user: CurrentUser) -> AdmissionsError {
    AdmissionsError::Conflict("This record already exists, use PUT to update it".to_owned())
}

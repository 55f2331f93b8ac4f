use chrono::{Datelike, Utc};
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use super::session_store;
use crate::{
    api::unique_constraint::is_unique_violation,
    config::Config,
    database::models::{
        account, application_profile, application_sequence, education_profile,
        registration_session,
    },
    error::{AdmissionsError, AdmissionsResult},
    password::{check_strength, hash_password},
};

pub const APPLICATION_ID_PREFIX: &str = "PWC";

#[must_use]
pub fn format_application_id(year: i32, sequence: i32) -> String {
    format!("{APPLICATION_ID_PREFIX}{year}{sequence:05}")
}

/// Bumps the per-year counter and returns the new application id.
///
/// The counter row is upserted, so the first applicant of a year starts at 1
/// and concurrent finalizations are ordered by the row lock.
pub async fn next_application_id<C: ConnectionTrait>(db: &C, year: i32) -> Result<String, DbErr> {
    let sequence = application_sequence::Entity::insert(application_sequence::ActiveModel {
        year: Set(year),
        last_value: Set(1),
    })
    .on_conflict(
        OnConflict::column(application_sequence::Column::Year)
            .value(
                application_sequence::Column::LastValue,
                Expr::col((
                    application_sequence::Entity,
                    application_sequence::Column::LastValue,
                ))
                .add(1),
            )
            .to_owned(),
    )
    .exec_with_returning(db)
    .await?;

    Ok(format_application_id(year, sequence.last_value))
}

/// Turns a verified registration into an account with empty profiles.
///
/// The account, both profiles and the session removal commit together or not
/// at all.
pub async fn finalize(
    db: &DatabaseConnection,
    config: &Config,
    session_id: Uuid,
    password: &str,
    confirm_password: &str,
) -> AdmissionsResult<account::Model> {
    let session = session_store::get(db, session_id).await?;

    if !session.is_fully_verified() {
        return Err(AdmissionsError::VerificationPending);
    }
    if password != confirm_password {
        return Err(AdmissionsError::PasswordMismatch);
    }
    check_strength(&config.password_policy, password).map_err(AdmissionsError::WeakPassword)?;

    let password_hash = hash_password(password).map_err(AdmissionsError::internal)?;

    let txn = db.begin().await?;

    let account = account::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(session.email.clone()),
        phone: Set(session.phone.clone()),
        first_name: Set(session.first_name.clone()),
        last_name: Set(session.last_name.clone()),
        password_hash: Set(password_hash),
        is_admitted: Set(false),
        admission_date: Set(None),
        is_active: Set(true),
        is_staff: Set(false),
        is_superuser: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|db_err| {
        if is_unique_violation(&db_err) {
            AdmissionsError::Conflict(
                "An account with this email or phone already exists".to_owned(),
            )
        } else {
            db_err.into()
        }
    })?;

    let application_id = next_application_id(&txn, Utc::now().year()).await?;

    let application = application_profile::ActiveModel {
        account_id: Set(account.id),
        application_id: Set(application_id),
        is_ews: Set(false),
        is_disabled: Set(false),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    education_profile::ActiveModel {
        account_id: Set(account.id),
        application_profile_id: Set(application.id),
        is_appearing: Set(true),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    registration_session::Entity::delete_by_id(session.id)
        .exec(&txn)
        .await?;

    txn.commit().await?;

    info!(
        "Account {} created from registration {} with application {}",
        account.id, session.id, application.application_id
    );

    Ok(account)
}

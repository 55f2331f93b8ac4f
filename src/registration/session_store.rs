use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    ModelTrait, QueryFilter,
};
use tracing::{debug, info};
use uuid::Uuid;

use super::otp;
use crate::{
    api::unique_constraint::is_unique_violation,
    app::App,
    database::models::{account, registration_session},
    error::{AdmissionsError, AdmissionsResult},
};

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn matching(email: &str, phone: &str) -> Condition {
    Condition::any()
        .add(registration_session::Column::Email.eq(email))
        .add(registration_session::Column::Phone.eq(phone))
}

/// Opens a pending registration and sends out its first pair of codes.
pub async fn start(
    app: &App,
    new: NewRegistration,
) -> AdmissionsResult<registration_session::Model> {
    let email = normalize_email(&new.email);
    let phone = new.phone.trim().to_owned();

    let account_exists = account::Entity::find()
        .filter(
            Condition::any()
                .add(account::Column::Email.eq(email.as_str()))
                .add(account::Column::Phone.eq(phone.as_str())),
        )
        .one(&app.db)
        .await?
        .is_some();
    if account_exists {
        return Err(AdmissionsError::Conflict(
            "An account with this email or phone already exists".to_owned(),
        ));
    }

    let pending = registration_session::Entity::find()
        .filter(matching(&email, &phone))
        .all(&app.db)
        .await?;
    for session in pending {
        if session.is_expired() {
            debug!("Sweeping expired registration {}", session.id);
            session.delete(&app.db).await?;
        } else {
            return Err(AdmissionsError::Conflict(
                "A registration is already pending for this email or phone, use resend-otp"
                    .to_owned(),
            ));
        }
    }

    let now = Utc::now();
    let codes = otp::generate(&app.config.registration);
    let expiry_hours = i64::try_from(app.config.registration.expiry_hours).unwrap_or(i64::MAX);

    let session = registration_session::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        phone: Set(phone),
        first_name: Set(new.first_name.trim().to_owned()),
        last_name: Set(new.last_name.trim().to_owned()),
        email_otp: Set(codes.email),
        phone_otp: Set(codes.phone),
        otp_expires_at: Set(codes.expires_at),
        is_email_verified: Set(false),
        is_phone_verified: Set(false),
        created_at: Set(now),
        expires_at: Set(now + Duration::hours(expiry_hours)),
    }
    .insert(&app.db)
    .await
    .map_err(|db_err| {
        if is_unique_violation(&db_err) {
            AdmissionsError::Conflict(
                "A registration is already pending for this email or phone".to_owned(),
            )
        } else {
            db_err.into()
        }
    })?;

    info!("Registration {} started", session.id);
    otp::deliver(app, &session).await;

    Ok(session)
}

/// Fails with `Expired` (removing the row) once the deadline has passed.
async fn live<C: ConnectionTrait>(
    db: &C,
    session: registration_session::Model,
) -> AdmissionsResult<registration_session::Model> {
    if session.is_expired() {
        debug!("Registration {} expired, deleting", session.id);
        session.delete(db).await?;
        return Err(AdmissionsError::Expired(
            "Registration session has expired, please register again".to_owned(),
        ));
    }

    Ok(session)
}

pub async fn get<C: ConnectionTrait>(
    db: &C,
    session_id: Uuid,
) -> AdmissionsResult<registration_session::Model> {
    let session = registration_session::Entity::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| AdmissionsError::NotFound("Registration session not found".to_owned()))?;

    live(db, session).await
}

/// The pending registration for exactly this email and phone.
pub async fn find_pending<C: ConnectionTrait>(
    db: &C,
    email: &str,
    phone: &str,
) -> AdmissionsResult<registration_session::Model> {
    let session = registration_session::Entity::find()
        .filter(registration_session::Column::Email.eq(normalize_email(email)))
        .filter(registration_session::Column::Phone.eq(phone.trim()))
        .one(db)
        .await?
        .ok_or_else(|| {
            AdmissionsError::NotFound("No pending registration for this email and phone".to_owned())
        })?;

    live(db, session).await
}

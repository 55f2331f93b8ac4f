use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, IntoActiveModel};
use tracing::{info, warn};
use uuid::Uuid;

use super::session_store;
use crate::{
    app::App,
    config::RegistrationConfig,
    database::models::registration_session,
    emails::send_otp_email,
    error::{AdmissionsError, AdmissionsResult},
    token::{codes_match, generate_numeric_code},
};

/// A freshly issued pair of codes.
#[derive(Debug, Clone)]
pub struct OtpPair {
    pub email: String,
    pub phone: String,
    pub expires_at: DateTime<Utc>,
}

#[must_use]
pub fn generate(config: &RegistrationConfig) -> OtpPair {
    let minutes = i64::try_from(config.otp_expiry_minutes).unwrap_or(i64::MAX);

    OtpPair {
        email: generate_numeric_code(config.otp_length),
        phone: generate_numeric_code(config.otp_length),
        expires_at: Utc::now() + Duration::minutes(minutes),
    }
}

/// Sends both codes. Delivery problems are logged and never surface.
pub async fn deliver(app: &App, session: &registration_session::Model) {
    if let Err(error) = send_otp_email(
        &app.config.email,
        &app.mailer,
        &session.email,
        &session.first_name,
        &session.email_otp,
        app.config.registration.otp_expiry_minutes,
    )
    .await
    {
        warn!("Failed to deliver email OTP for registration {}: {error}", session.id);
    }

    let body = format!(
        "Your admission registration code is {}. It is valid for {} minutes.",
        session.phone_otp, app.config.registration.otp_expiry_minutes
    );
    app.sms.send(&session.phone, &body).await;
}

/// Result of checking one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChannelCheck {
    Verified,
    Matched,
    Failed(&'static str),
}

fn check_channel(
    already_verified: bool,
    otp_expired: bool,
    expected: &str,
    submitted: &str,
    mismatch: &'static str,
) -> ChannelCheck {
    if already_verified {
        ChannelCheck::Verified
    } else if otp_expired {
        ChannelCheck::Failed("The code has expired, request a new one")
    } else if codes_match(expected, submitted.trim()) {
        ChannelCheck::Matched
    } else {
        ChannelCheck::Failed(mismatch)
    }
}

/// Checks both channels independently.
///
/// A matching channel is marked verified even when the other one fails, and a
/// channel that is already verified always passes. Codes stay valid after a
/// mismatch until they expire.
pub async fn verify(
    db: &DatabaseConnection,
    session_id: Uuid,
    email_otp: &str,
    phone_otp: &str,
) -> AdmissionsResult<registration_session::Model> {
    let session = session_store::get(db, session_id).await?;
    let otp_expired = session.is_otp_expired();

    let email = check_channel(
        session.is_email_verified,
        otp_expired,
        &session.email_otp,
        email_otp,
        "Invalid email OTP",
    );
    let phone = check_channel(
        session.is_phone_verified,
        otp_expired,
        &session.phone_otp,
        phone_otp,
        "Invalid phone OTP",
    );

    let session = if email == ChannelCheck::Matched || phone == ChannelCheck::Matched {
        let mut model = session.into_active_model();
        if email == ChannelCheck::Matched {
            model.is_email_verified = Set(true);
        }
        if phone == ChannelCheck::Matched {
            model.is_phone_verified = Set(true);
        }
        model.update(db).await?
    } else {
        session
    };

    let failure = |check: &ChannelCheck| match check {
        ChannelCheck::Failed(message) => Some((*message).to_owned()),
        ChannelCheck::Verified | ChannelCheck::Matched => None,
    };
    let (email_error, phone_error) = (failure(&email), failure(&phone));

    if email_error.is_some() || phone_error.is_some() {
        warn!("OTP verification failed for registration {session_id}");
        return Err(AdmissionsError::InvalidOtp {
            email: email_error,
            phone: phone_error,
        });
    }

    info!("Registration {session_id} verified");
    Ok(session)
}

/// Replaces both codes of the pending registration and sends them again.
pub async fn resend(
    app: &App,
    email: &str,
    phone: &str,
) -> AdmissionsResult<registration_session::Model> {
    let session = session_store::find_pending(&app.db, email, phone).await?;
    let codes = generate(&app.config.registration);

    let mut model = session.into_active_model();
    model.email_otp = Set(codes.email);
    model.phone_otp = Set(codes.phone);
    model.otp_expires_at = Set(codes.expires_at);
    let session = model.update(&app.db).await?;

    info!("OTPs re-issued for registration {}", session.id);
    deliver(app, &session).await;

    Ok(session)
}

use axum::http::StatusCode;
use chrono::{Datelike, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter,
};
use serde_json::{json, Value};
use uuid::Uuid;

use super::setup_test::{setup_test, TEST_PASSWORD};
use crate::{
    database::models::{account, application_profile, education_profile},
    registration::materializer::format_application_id,
};

/// A code of the right length that is guaranteed not to be `code`.
fn wrong_code(code: &str) -> String {
    if code.starts_with('0') {
        code.replace('0', "1")
    } else {
        "0".repeat(code.len())
    }
}

#[tokio::test]
async fn register_sends_a_code_on_each_channel() {
    let test = setup_test().await;

    let session_id = test.register("asha@example.com", "9876543210").await;
    let session = test.session(session_id).await.unwrap();

    assert!(!session.is_email_verified);
    assert!(!session.is_phone_verified);
    assert!(session.expires_at > Utc::now() + Duration::hours(23));

    let emails = test.sent_emails();
    assert_eq!(emails.len(), 1);
    let raw = String::from_utf8(emails[0].formatted()).unwrap();
    assert!(raw.contains("asha@example.com"));
    assert!(raw.contains(&session.email_otp));

    let sms = test.sent_sms();
    assert_eq!(sms.len(), 1);
    assert_eq!(sms[0].to, "9876543210");
    assert!(sms[0].body.contains(&session.phone_otp));
}

#[tokio::test]
async fn register_rejects_invalid_input() {
    let test = setup_test().await;

    let response = test
        .server
        .post("/api/register")
        .json(&json!({
            "email": "not-an-email",
            "phone": "12345",
            "first_name": "Asha",
            "last_name": " ",
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["phone"].is_array());
    assert!(body["errors"]["last_name"].is_array());
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let test = setup_test().await;
    test.register("asha@example.com", "9876543210").await;

    for (email, phone) in [
        ("asha@example.com", "9000000001"),
        ("ASHA@example.com", "9000000002"),
        ("other@example.com", "9876543210"),
    ] {
        let response = test
            .server
            .post("/api/register")
            .json(&json!({
                "email": email,
                "phone": phone,
                "first_name": "Asha",
                "last_name": "Rao",
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: Value = response.json();
        assert_eq!(body["error"], "conflict");
    }
}

#[tokio::test]
async fn registering_an_existing_account_conflicts() {
    let test = setup_test().await;
    test.create_account("asha@example.com", "9876543210").await;

    let response = test
        .server
        .post("/api/register")
        .json(&json!({
            "email": "someone@example.com",
            "phone": "9876543210",
            "first_name": "Someone",
            "last_name": "Else",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn wrong_codes_leave_verification_flags_unchanged() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;
    let session = test.session(session_id).await.unwrap();

    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": wrong_code(&session.email_otp),
            "phone_otp": wrong_code(&session.phone_otp),
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_otp");
    assert_eq!(body["email_otp_error"], "Invalid email OTP");
    assert_eq!(body["phone_otp_error"], "Invalid phone OTP");
    assert!(!body.to_string().contains(&session.email_otp));

    let after = test.session(session_id).await.unwrap();
    assert!(!after.is_email_verified);
    assert!(!after.is_phone_verified);
    assert_eq!(after.email_otp, session.email_otp);

    // A failed attempt does not burn the codes.
    test.verify(session_id).await;
}

#[tokio::test]
async fn channels_are_verified_independently() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;
    let session = test.session(session_id).await.unwrap();

    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": session.email_otp,
            "phone_otp": wrong_code(&session.phone_otp),
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("email_otp_error").is_none());
    assert_eq!(body["phone_otp_error"], "Invalid phone OTP");

    let after = test.session(session_id).await.unwrap();
    assert!(after.is_email_verified);
    assert!(!after.is_phone_verified);

    let response = test
        .server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "verification_pending");

    // The verified channel passes whatever is sent for it next time.
    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": "anything",
            "phone_otp": session.phone_otp,
        }))
        .await;
    response.assert_status_ok();

    let after = test.session(session_id).await.unwrap();
    assert!(after.is_email_verified && after.is_phone_verified);
}

#[tokio::test]
async fn verified_channel_may_be_left_out_on_retry() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;
    let session = test.session(session_id).await.unwrap();

    // Nothing verified yet, so a missing code is just a wrong one.
    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({ "session_id": session_id, "email_otp": session.email_otp }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_otp");
    assert_eq!(body["phone_otp_error"], "Invalid phone OTP");

    // Email is verified now; an empty or absent email code passes.
    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": "",
            "phone_otp": wrong_code(&session.phone_otp),
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_otp");
    assert!(body.get("email_otp_error").is_none());

    test.server
        .post("/api/verify-otp")
        .json(&json!({ "session_id": session_id, "phone_otp": session.phone_otp }))
        .await
        .assert_status_ok();

    let after = test.session(session_id).await.unwrap();
    assert!(after.is_email_verified && after.is_phone_verified);
}

#[tokio::test]
async fn verifying_twice_is_idempotent() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;

    test.verify(session_id).await;
    test.verify(session_id).await;
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let test = setup_test().await;

    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": Uuid::new_v4(),
            "email_otp": "123456",
            "phone_otp": "123456",
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn expired_session_is_gone_and_deleted() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;

    let mut session = test.session(session_id).await.unwrap().into_active_model();
    session.expires_at = Set(Utc::now() - Duration::minutes(1));
    session.update(&test.db).await.unwrap();

    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": "123456",
            "phone_otp": "123456",
        }))
        .await;

    response.assert_status(StatusCode::GONE);
    let body: Value = response.json();
    assert_eq!(body["error"], "expired");
    assert!(test.session(session_id).await.is_none());

    // The address is free again.
    test.register("asha@example.com", "9876543210").await;
}

#[tokio::test]
async fn expired_codes_must_be_resent() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;

    let mut session = test.session(session_id).await.unwrap().into_active_model();
    session.otp_expires_at = Set(Utc::now() - Duration::minutes(1));
    session.update(&test.db).await.unwrap();
    let session = test.session(session_id).await.unwrap();

    let response = test
        .server
        .post("/api/verify-otp")
        .json(&json!({
            "session_id": session_id,
            "email_otp": session.email_otp,
            "phone_otp": session.phone_otp,
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    test.server
        .post("/api/resend-otp")
        .json(&json!({ "email": "asha@example.com", "phone": "9876543210" }))
        .await
        .assert_status_ok();

    test.verify(session_id).await;
}

#[tokio::test]
async fn resend_issues_fresh_codes() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;

    let response = test
        .server
        .post("/api/resend-otp")
        .json(&json!({ "email": "Asha@Example.com", "phone": "9876543210" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["session_id"], session_id.to_string());
    assert_eq!(test.sent_emails().len(), 2);
    assert_eq!(test.sent_sms().len(), 2);

    let session = test.session(session_id).await.unwrap();
    assert!(test.sent_sms()[1].body.contains(&session.phone_otp));
    test.verify(session_id).await;
}

#[tokio::test]
async fn resend_without_pending_registration_is_not_found() {
    let test = setup_test().await;
    test.register("asha@example.com", "9876543210").await;

    let response = test
        .server
        .post("/api/resend-otp")
        .json(&json!({ "email": "asha@example.com", "phone": "9000000000" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(test.sent_sms().len(), 1);
}

#[tokio::test]
async fn set_password_checks_confirmation_and_strength() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;
    test.verify(session_id).await;

    let response = test
        .server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": TEST_PASSWORD,
            "confirm_password": "Secret124!",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "password_mismatch");

    let response = test
        .server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": "short",
            "confirm_password": "short",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "weak_password");

    assert!(test.account_by_email("asha@example.com").await.is_none());
    assert!(test.session(session_id).await.is_some());
}

#[tokio::test]
async fn completed_registration_creates_account_and_empty_profiles() {
    let test = setup_test().await;
    let session_id = test.register("a@x.com", "1111111111").await;
    test.verify(session_id).await;

    let response = test
        .server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": "Secret123!",
            "confirm_password": "Secret123!",
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["account"]["email"], "a@x.com");
    assert_eq!(body["account"]["is_admitted"], false);
    assert!(body["account"].get("password_hash").is_none());

    let account = test.account_by_email("a@x.com").await.unwrap();
    assert!(!account.is_admitted);
    assert!(account.admission_date.is_none());
    assert_ne!(account.password_hash, "Secret123!");
    assert!(test.session(session_id).await.is_none());

    let application = application_profile::Entity::find()
        .filter(application_profile::Column::AccountId.eq(account.id))
        .one(&test.db)
        .await
        .unwrap()
        .unwrap();
    let prefix = format!("PWC{}", Utc::now().year());
    assert!(application.application_id.starts_with(&prefix));
    assert!(application.date_of_birth.is_none());
    assert!(application.father_name.is_none());

    let education = education_profile::Entity::find()
        .filter(education_profile::Column::AccountId.eq(account.id))
        .one(&test.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(education.application_profile_id, application.id);
    assert!(education.is_appearing);
    assert!(education.school_name_10th.is_none());
    assert!(education.subject1_marks_10th.is_none());
    assert!(education.percentage_10th.is_none());
    assert!(education.school_name_12th.is_none());
    assert!(education.percentage_12th.is_none());
}

#[tokio::test]
async fn finished_session_cannot_be_reused() {
    let test = setup_test().await;
    let session_id = test.register("asha@example.com", "9876543210").await;
    test.verify(session_id).await;

    for expected in [StatusCode::CREATED, StatusCode::NOT_FOUND] {
        test.server
            .post("/api/set-password")
            .json(&json!({
                "session_id": session_id,
                "password": TEST_PASSWORD,
                "confirm_password": TEST_PASSWORD,
            }))
            .await
            .assert_status(expected);
    }
}

#[tokio::test]
async fn application_ids_increase_within_a_year() {
    let test = setup_test().await;
    let year = Utc::now().year();

    let mut ids = Vec::new();
    for n in 0..3 {
        let account = test
            .create_account(&format!("applicant{n}@example.com"), &format!("900000000{n}"))
            .await;
        let application = application_profile::Entity::find()
            .filter(application_profile::Column::AccountId.eq(account.id))
            .one(&test.db)
            .await
            .unwrap()
            .unwrap();
        ids.push(application.application_id);
    }

    assert_eq!(
        ids,
        vec![
            format_application_id(year, 1),
            format_application_id(year, 2),
            format_application_id(year, 3),
        ]
    );
    for id in &ids {
        assert_eq!(id.len(), "PWC".len() + 4 + 5);
        assert!(id["PWC".len()..].chars().all(|c| c.is_ascii_digit()));
    }
}

#[tokio::test]
async fn failed_finalization_leaves_nothing_behind() {
    let test = setup_test().await;
    let year = Utc::now().year();

    // Occupy the id the next finalization will be handed, so creating the
    // application profile fails after the account row was written.
    let squatter = account::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set("squatter@example.com".to_owned()),
        phone: Set("9000000009".to_owned()),
        first_name: Set("Squat".to_owned()),
        last_name: Set("Ter".to_owned()),
        password_hash: Set("not-a-hash".to_owned()),
        is_admitted: Set(false),
        admission_date: Set(None),
        is_active: Set(true),
        is_staff: Set(false),
        is_superuser: Set(false),
        ..Default::default()
    }
    .insert(&test.db)
    .await
    .unwrap();
    application_profile::ActiveModel {
        account_id: Set(squatter.id),
        application_id: Set(format_application_id(year, 1)),
        is_ews: Set(false),
        is_disabled: Set(false),
        ..Default::default()
    }
    .insert(&test.db)
    .await
    .unwrap();

    let session_id = test.register("asha@example.com", "9876543210").await;
    test.verify(session_id).await;

    let response = test
        .server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "internal_error");

    assert!(test.account_by_email("asha@example.com").await.is_none());
    assert!(test.session(session_id).await.is_some());
    assert_eq!(
        education_profile::Entity::find().all(&test.db).await.unwrap().len(),
        0
    );

    // The sequence bump was rolled back as well, so a retry is handed the same id.
    test.server
        .post("/api/set-password")
        .json(&json!({
            "session_id": session_id,
            "password": TEST_PASSWORD,
            "confirm_password": TEST_PASSWORD,
        }))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

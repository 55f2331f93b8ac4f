use axum::http::StatusCode;
use serde_json::{json, Value};

use super::setup_test::setup_test;

fn completed_12th() -> Value {
    json!({
        "school_name_10th": "St. Mary's High School",
        "school_board_10th": "ICSE",
        "subject1_marks_10th": 90,
        "subject2_marks_10th": 80,
        "subject3_marks_10th": 70,
        "subject4_marks_10th": 60,
        "subject5_marks_10th": 50,
        "is_appearing": false,
        "school_name_12th": "City College",
        "school_board_12th": "CBSE",
        "subject_stream": "science",
        "subject1_marks_12th": 90,
        "subject2_marks_12th": 85,
        "subject3_marks_12th": 77,
        "subject4_marks_12th": 68,
        "subject5_marks_12th": 91,
        "subject6_marks_12th": 80,
    })
}

#[tokio::test]
async fn profiles_require_authentication() {
    let test = setup_test().await;

    for path in ["/api/user-application", "/api/user-education-details"] {
        test.server
            .get(path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn application_profile_is_replaced_but_keeps_its_id() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let before: Value = test
        .server
        .get("/api/user-application")
        .authorization_bearer(&token)
        .await
        .json();
    let application_id = before["application_id"].as_str().unwrap().to_owned();

    let response = test
        .server
        .put("/api/user-application")
        .authorization_bearer(&token)
        .json(&json!({
            "application_id": "PWC199900001",
            "date_of_birth": "2007-04-12",
            "gender": "female",
            "aadhaar_number": "123412341234",
            "current_address": "12 MG Road, Pune",
            "father_name": "Ravi Rao",
            "father_phone": "9123456780",
            "is_ews": true,
            "ews_certificate": "certificates/ews.pdf",
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["application_id"], application_id);
    assert_eq!(body["date_of_birth"], "2007-04-12");
    assert_eq!(body["gender"], "female");
    assert_eq!(body["is_ews"], true);

    // PUT replaces the whole record; omitted fields are cleared.
    let body: Value = test
        .server
        .put("/api/user-application")
        .authorization_bearer(&token)
        .json(&json!({ "father_name": "Ravi Rao" }))
        .await
        .json();
    assert_eq!(body["application_id"], application_id);
    assert!(body["date_of_birth"].is_null());
    assert!(body["aadhaar_number"].is_null());
    assert_eq!(body["is_ews"], false);
}

#[tokio::test]
async fn application_profile_rejects_bad_numbers_and_future_birth_dates() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    for payload in [
        json!({ "aadhaar_number": "1234" }),
        json!({ "mother_phone": "98765" }),
        json!({ "date_of_birth": "2999-01-01" }),
    ] {
        let response = test
            .server
            .put("/api/user-application")
            .authorization_bearer(&token)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn aadhaar_number_belongs_to_one_applicant() {
    let test = setup_test().await;
    let (_, first) = test.signed_in("asha@example.com", "9876543210").await;
    let (_, second) = test.signed_in("ravi@example.com", "9123456780").await;
    let payload = json!({ "aadhaar_number": "123412341234" });

    test.server
        .put("/api/user-application")
        .authorization_bearer(&first)
        .json(&payload)
        .await
        .assert_status_ok();

    let response = test
        .server
        .put("/api/user-application")
        .authorization_bearer(&second)
        .json(&payload)
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn profiles_cannot_be_created_twice() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    for path in ["/api/user-application", "/api/user-education-details"] {
        test.server
            .post(path)
            .authorization_bearer(&token)
            .json(&json!({}))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}

#[tokio::test]
async fn appearing_students_may_leave_12th_empty() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let response = test
        .server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&json!({
            "school_name_10th": "St. Mary's High School",
            "subject1_marks_10th": 88,
            "is_appearing": true,
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_appearing"], true);
    assert!(body["school_name_12th"].is_null());
    assert!(body["subject1_marks_12th"].is_null());
    assert!(body["percentage_12th"].is_null());
    assert_eq!(body["percentage_10th"], json!(88.0));
}

#[tokio::test]
async fn fresh_accounts_await_results_until_told_otherwise() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let fresh: Value = test
        .server
        .get("/api/user-education-details")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(fresh["is_appearing"], true);

    let response = test
        .server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&json!({
            "school_name_10th": "St. Mary's High School",
            "subject1_marks_10th": 90,
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_appearing"], true);
    assert_eq!(body["percentage_10th"], json!(90.0));

    let response = test
        .server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&json!({ "is_appearing": false }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn completed_12th_requires_every_mark() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let mut payload = completed_12th();
    payload["subject6_marks_12th"] = Value::Null;

    let response = test
        .server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&payload)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "validation_error");

    let stored: Value = test
        .server
        .get("/api/user-education-details")
        .authorization_bearer(&token)
        .await
        .json();
    assert!(stored["school_name_12th"].is_null());
}

#[tokio::test]
async fn percentages_are_computed_on_save() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let response = test
        .server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&completed_12th())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["percentage_10th"], json!(70.0));
    assert_eq!(body["percentage_12th"], json!(81.83));
    assert_eq!(body["subject_stream"], "science");
}

#[tokio::test]
async fn marks_must_be_percentages() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let mut payload = completed_12th();
    payload["subject1_marks_12th"] = json!(101);

    test.server
        .put("/api/user-education-details")
        .authorization_bearer(&token)
        .json(&payload)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

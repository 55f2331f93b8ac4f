use axum::http::StatusCode;
use serde_json::{json, Value};

use super::setup_test::{setup_test, TestUtils};
use crate::catalog::CourseTier;

/// Codes offered for `tier_plural` in a course application response.
fn offered(body: &Value, tier_plural: &str) -> Vec<String> {
    body["available_options"][tier_plural]
        .as_array()
        .unwrap_or_else(|| panic!("missing options for {tier_plural}"))
        .iter()
        .map(|option| option["code"].as_str().unwrap().to_owned())
        .collect()
}

/// Code of the current selection for `tier`, if any.
fn selected(body: &Value, tier: &str) -> Option<String> {
    body["selected_values"][tier]["code"]
        .as_str()
        .map(str::to_owned)
}

async fn update(test: &TestUtils, token: &str, changes: Value) -> Value {
    let response = test
        .server
        .put("/api/course-application")
        .authorization_bearer(token)
        .json(&changes)
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn requires_authentication() {
    let test = setup_test().await;

    test.server
        .get("/api/course-application")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    test.server
        .put("/api/course-application")
        .json(&json!({}))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_application_offers_roots_and_cross_cutting_courses() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let response = test
        .server
        .get("/api/course-application")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();

    for tier in CourseTier::ALL {
        assert!(body["selected_values"][tier.to_string()].is_null());
    }
    assert_eq!(body["selected_values"]["fee_amount"], "0.00");
    assert_eq!(body["selected_values"]["is_fee_paid"], false);

    assert_eq!(offered(&body, "degrees"), ["PG", "UG"]);
    assert_eq!(offered(&body, "programs"), ["BA", "BSC", "MSC"]);
    assert!(offered(&body, "majors").is_empty());
    assert!(offered(&body, "minors").is_empty());
    assert!(offered(&body, "mdcs").is_empty());
    assert_eq!(offered(&body, "vacs"), ["YOGA"]);
    assert_eq!(offered(&body, "aecs"), ["ENG"]);
    assert!(offered(&body, "aocs").is_empty());
}

#[tokio::test]
async fn degree_narrows_programs_without_restricting_them() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let ug = test.catalog_id(CourseTier::Degree, "UG").await;
    let msc = test.catalog_id(CourseTier::Program, "MSC").await;

    let body = update(&test, &token, json!({ "degree": ug })).await;
    assert_eq!(selected(&body, "degree").as_deref(), Some("UG"));
    assert_eq!(offered(&body, "programs"), ["BA", "BSC"]);

    let body = update(&test, &token, json!({ "program": msc })).await;
    assert_eq!(selected(&body, "degree").as_deref(), Some("UG"));
    assert_eq!(selected(&body, "program").as_deref(), Some("MSC"));
}

#[tokio::test]
async fn selections_unlock_the_tiers_below() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let phy = test.catalog_id(CourseTier::Major, "PHY").await;

    let body = update(&test, &token, json!({ "program": bsc })).await;
    assert_eq!(offered(&body, "majors"), ["PHY"]);
    assert!(offered(&body, "minors").is_empty());
    assert_eq!(offered(&body, "vacs"), ["YOGA"]);
    assert_eq!(offered(&body, "aocs"), ["DATA"]);

    let body = update(&test, &token, json!({ "major": phy })).await;
    assert_eq!(offered(&body, "minors"), ["CHEM", "MATH"]);
    assert_eq!(offered(&body, "mdcs"), ["ENV"]);
}

#[tokio::test]
async fn incompatible_selection_is_rejected_and_nothing_changes() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let ba = test.catalog_id(CourseTier::Program, "BA").await;
    let phy = test.catalog_id(CourseTier::Major, "PHY").await;
    let hist = test.catalog_id(CourseTier::Major, "HIST").await;

    update(&test, &token, json!({ "program": bsc })).await;

    let response = test
        .server
        .put("/api/course-application")
        .authorization_bearer(&token)
        .json(&json!({ "major": hist }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "incompatible_selection");
    assert_eq!(body["field"], "major");

    // The program change is valid on its own, but the request as a whole is not.
    let response = test
        .server
        .put("/api/course-application")
        .authorization_bearer(&token)
        .json(&json!({ "program": ba, "major": phy }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = test
        .server
        .get("/api/course-application")
        .authorization_bearer(&token)
        .await
        .json();
    assert_eq!(selected(&body, "program").as_deref(), Some("BSC"));
    assert_eq!(selected(&body, "major"), None);
}

#[tokio::test]
async fn minors_need_a_major_that_offers_them() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let math = test.catalog_id(CourseTier::Minor, "MATH").await;

    update(&test, &token, json!({ "program": bsc })).await;

    let response = test
        .server
        .put("/api/course-application")
        .authorization_bearer(&token)
        .json(&json!({ "minor": math }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "minor");
}

#[tokio::test]
async fn unknown_or_mistiered_ids_are_not_found() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let ug = test.catalog_id(CourseTier::Degree, "UG").await;

    for changes in [json!({ "program": 999_999 }), json!({ "program": ug })] {
        let response = test
            .server
            .put("/api/course-application")
            .authorization_bearer(&token)
            .json(&changes)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn unknown_fields_are_rejected() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;

    let response = test
        .server
        .put("/api/course-application")
        .authorization_bearer(&token)
        .json(&json!({ "elective": 1 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "invalid_json");
}

#[tokio::test]
async fn changing_program_clears_what_it_does_not_offer() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let ba = test.catalog_id(CourseTier::Program, "BA").await;

    let body = update(
        &test,
        &token,
        json!({
            "program": bsc,
            "major": test.catalog_id(CourseTier::Major, "PHY").await,
            "minor": test.catalog_id(CourseTier::Minor, "MATH").await,
            "mdc": test.catalog_id(CourseTier::Mdc, "ENV").await,
            "vac": test.catalog_id(CourseTier::Vac, "YOGA").await,
            "aec": test.catalog_id(CourseTier::Aec, "ENG").await,
            "aoc": test.catalog_id(CourseTier::Aoc, "DATA").await,
        }),
    )
    .await;
    assert_eq!(selected(&body, "minor").as_deref(), Some("MATH"));
    // 500 + 1500 + 500 + 250 + 100 + 100 + 200 rupees
    assert_eq!(body["selected_values"]["fee_amount"], "3150.00");

    let body = update(&test, &token, json!({ "program": ba })).await;

    assert_eq!(selected(&body, "program").as_deref(), Some("BA"));
    for cleared in ["major", "minor", "mdc", "aoc"] {
        assert_eq!(selected(&body, cleared), None, "{cleared} should be cleared");
    }
    assert_eq!(selected(&body, "vac").as_deref(), Some("YOGA"));
    assert_eq!(selected(&body, "aec").as_deref(), Some("ENG"));
    assert_eq!(offered(&body, "majors"), ["HIST"]);
    assert_eq!(offered(&body, "aocs"), ["THEATRE"]);
    assert_eq!(body["selected_values"]["fee_amount"], "700.00");
}

#[tokio::test]
async fn clearing_a_tier_with_null() {
    let test = setup_test().await;
    let (_, token) = test.signed_in("asha@example.com", "9876543210").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let phy = test.catalog_id(CourseTier::Major, "PHY").await;
    let math = test.catalog_id(CourseTier::Minor, "MATH").await;

    update(&test, &token, json!({ "program": bsc, "major": phy, "minor": math })).await;

    let body = update(&test, &token, json!({ "major": null })).await;
    assert_eq!(selected(&body, "program").as_deref(), Some("BSC"));
    assert_eq!(selected(&body, "major"), None);
    assert_eq!(selected(&body, "minor"), None);
    assert_eq!(body["selected_values"]["fee_amount"], "500.00");
}

#[tokio::test]
async fn fee_payment_is_reset_when_the_selection_changes() {
    let test = setup_test().await;
    let (account, token) = test.signed_in("asha@example.com", "9876543210").await;
    let (staff, _) = test.signed_in("staff@example.com", "9000000001").await;
    test.make_staff(staff).await;
    let staff_token = test.login("staff@example.com").await;
    let bsc = test.catalog_id(CourseTier::Program, "BSC").await;
    let yoga = test.catalog_id(CourseTier::Vac, "YOGA").await;

    update(&test, &token, json!({ "program": bsc })).await;

    let response = test
        .server
        .post(&format!(
            "/api/admin/course-applications/{}/mark-paid",
            account.id
        ))
        .authorization_bearer(&staff_token)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["is_fee_paid"], true);
    assert_eq!(body["fee_amount"], "500.00");

    // Re-sending the current selection is not a change.
    let body = update(&test, &token, json!({ "program": bsc })).await;
    assert_eq!(body["selected_values"]["is_fee_paid"], true);

    let body = update(&test, &token, json!({ "vac": yoga })).await;
    assert_eq!(body["selected_values"]["is_fee_paid"], false);
    assert_eq!(body["selected_values"]["fee_amount"], "600.00");
}

#[tokio::test]
async fn only_staff_can_mark_fees_paid() {
    let test = setup_test().await;
    let (account, token) = test.signed_in("asha@example.com", "9876543210").await;
    test.server
        .get("/api/course-application")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    let response = test
        .server
        .post(&format!(
            "/api/admin/course-applications/{}/mark-paid",
            account.id
        ))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn marking_a_missing_application_is_not_found() {
    let test = setup_test().await;
    let (staff, _) = test.signed_in("staff@example.com", "9000000001").await;
    let (other, _) = test.signed_in("asha@example.com", "9876543210").await;
    test.make_staff(staff).await;
    let staff_token = test.login("staff@example.com").await;

    test.server
        .post(&format!(
            "/api/admin/course-applications/{}/mark-paid",
            other.id
        ))
        .authorization_bearer(&staff_token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

use serde_json::{json, Value};

use super::setup_test::{setup_test, CATALOG_FIXTURE};
use crate::catalog::{seed_catalog, CatalogIndex, CatalogSeed, CourseTier, SeedError};

fn entry<'a>(body: &'a Value, tier_plural: &str, code: &str) -> &'a Value {
    body[tier_plural]
        .as_array()
        .and_then(|entries| entries.iter().find(|entry| entry["code"] == code))
        .unwrap_or_else(|| panic!("{code} missing from {tier_plural}"))
}

#[tokio::test]
async fn catalog_is_public_and_grouped_by_tier() {
    let test = setup_test().await;

    let response = test.server.get("/api/catalog").await;
    response.assert_status_ok();
    let body: Value = response.json();

    for tier in CourseTier::ALL {
        assert!(body[tier.plural()].is_array(), "{} missing", tier.plural());
    }

    let physics = entry(&body, "majors", "PHY");
    assert_eq!(physics["name"], "Physics");
    assert_eq!(physics["seats_available"], 60);
    assert_eq!(physics["total_seats"], 65);
    assert_eq!(physics["entrance_exam_at"], "2026-05-10T09:00:00Z");
    assert_eq!(physics["offered_under"], json!({ "programs": ["BSC"] }));

    let env = entry(&body, "mdcs", "ENV");
    assert_eq!(
        env["offered_under"],
        json!({ "majors": ["HIST", "PHY"], "programs": ["BA", "BSC"] })
    );

    let bsc = entry(&body, "programs", "BSC");
    assert_eq!(bsc["stream"], "science");
    assert_eq!(bsc["offered_under"], json!({ "degrees": ["UG"] }));

    let yoga = entry(&body, "vacs", "YOGA");
    assert!(yoga.get("offered_under").is_none());
}

#[tokio::test]
async fn seeding_the_same_file_twice_changes_nothing() {
    let test = setup_test().await;
    let seed = CatalogSeed::from_yaml(CATALOG_FIXTURE).unwrap();
    let before = CatalogIndex::load(&test.db).await.unwrap();

    let report = seed_catalog(&test.db, &seed).await.unwrap();

    assert_eq!(report.inserted, 0);
    assert_eq!(report.updated, before.len());
    assert_eq!(report.links, 0);
    assert_eq!(CatalogIndex::load(&test.db).await.unwrap().len(), before.len());
}

#[tokio::test]
async fn reseeding_updates_entries_in_place() {
    let test = setup_test().await;
    let physics_id = test.catalog_id(CourseTier::Major, "PHY").await;

    let seed = CatalogSeed::from_yaml(
        "
programs:
  - code: BSC
    name: Bachelor of Science
majors:
  - code: PHY
    name: Physics (Honours)
    programs: [BSC]
    seats_available: 70
aocs:
  - code: ROBOTICS
    name: Robotics
    programs: [BSC]
",
    )
    .unwrap();
    let report = seed_catalog(&test.db, &seed).await.unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.updated, 2);
    assert_eq!(report.links, 1);

    let body: Value = test.server.get("/api/catalog").await.json();
    let physics = entry(&body, "majors", "PHY");
    assert_eq!(physics["id"], physics_id);
    assert_eq!(physics["name"], "Physics (Honours)");
    assert_eq!(physics["total_seats"], 70);
    entry(&body, "aocs", "ROBOTICS");
}

#[tokio::test]
async fn unknown_references_abort_the_whole_seed() {
    let test = setup_test().await;
    let before = CatalogIndex::load(&test.db).await.unwrap().len();

    let seed = CatalogSeed::from_yaml(
        "
vacs:
  - code: MUSIC
    name: Music
    programs: [BCOM]
",
    )
    .unwrap();

    let error = seed_catalog(&test.db, &seed).await.unwrap_err();
    assert!(matches!(
        error,
        SeedError::UnknownReference { tier: CourseTier::Program, ref code, .. } if code == "BCOM"
    ));
    assert_eq!(CatalogIndex::load(&test.db).await.unwrap().len(), before);
}

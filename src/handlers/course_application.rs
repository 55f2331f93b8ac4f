use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::{
    api::{patch::double_option, ValidatedJson},
    app::App,
    auth::CurrentUser,
    catalog::CourseTier,
    course_selection::{service, CourseApplicationView},
    error::AdmissionsResult,
};

/// Per-tier change: absent leaves the tier alone, `null` clears it and an id
/// selects that entry.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CourseApplicationPatch {
    #[serde(default, deserialize_with = "double_option")]
    pub degree: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub program: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub major: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub minor: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub mdc: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub vac: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub aec: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub aoc: Option<Option<i32>>,
}

impl CourseApplicationPatch {
    /// The fields present in the request, in tier order.
    #[must_use]
    pub fn changes(&self) -> Vec<(CourseTier, Option<i32>)> {
        [
            (CourseTier::Degree, self.degree),
            (CourseTier::Program, self.program),
            (CourseTier::Major, self.major),
            (CourseTier::Minor, self.minor),
            (CourseTier::Mdc, self.mdc),
            (CourseTier::Vac, self.vac),
            (CourseTier::Aec, self.aec),
            (CourseTier::Aoc, self.aoc),
        ]
        .into_iter()
        .filter_map(|(tier, change)| change.map(|value| (tier, value)))
        .collect()
    }
}

pub async fn show(
    State(app): State<App>,
    current_user: CurrentUser,
) -> AdmissionsResult<Json<CourseApplicationView>> {
    Ok(Json(
        service::show(&app.db, &app.config, current_user.id).await?,
    ))
}

pub async fn update(
    State(app): State<App>,
    current_user: CurrentUser,
    ValidatedJson(patch): ValidatedJson<CourseApplicationPatch>,
) -> AdmissionsResult<Json<CourseApplicationView>> {
    Ok(Json(
        service::apply_changes(&app.db, &app.config, current_user.id, patch.changes()).await?,
    ))
}

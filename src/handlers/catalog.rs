use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::{
    app::App,
    catalog::{listing, CatalogEntryView, CatalogIndex},
    error::AdmissionsResult,
};

pub async fn index(
    State(app): State<App>,
) -> AdmissionsResult<Json<BTreeMap<&'static str, Vec<CatalogEntryView>>>> {
    let catalog = CatalogIndex::load(&app.db).await?;

    Ok(Json(listing(&catalog)))
}

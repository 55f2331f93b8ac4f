use std::collections::BTreeMap;

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
};
use serde::Serialize;
use uuid::Uuid;

use super::resolver::{paise_to_rupees, Resolver, Selection, SelectionError};
use crate::{
    api::unique_constraint::is_unique_violation,
    catalog::{CatalogIndex, CourseTier},
    config::Config,
    database::models::{
        catalog_entry,
        course_application::{self, tier_column},
    },
    error::{AdmissionsError, AdmissionsResult},
};

/// Short form of a catalog entry used in selections and option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<&catalog_entry::Model> for CatalogOption {
    fn from(entry: &catalog_entry::Model) -> Self {
        Self {
            id: entry.id,
            code: entry.code.clone(),
            name: entry.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectedValues {
    #[serde(flatten)]
    pub tiers: BTreeMap<CourseTier, Option<CatalogOption>>,
    pub fee_amount: Decimal,
    pub is_fee_paid: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseApplicationView {
    pub selected_values: SelectedValues,
    pub available_options: BTreeMap<&'static str, Vec<CatalogOption>>,
}

impl CourseApplicationView {
    fn build(
        resolver: &Resolver<'_>,
        catalog: &CatalogIndex,
        application: &course_application::Model,
    ) -> Self {
        let selection = Selection::from(application);

        let tiers = CourseTier::ALL
            .into_iter()
            .map(|tier| {
                let selected = selection
                    .get(tier)
                    .and_then(|id| catalog.get(id))
                    .map(CatalogOption::from);
                (tier, selected)
            })
            .collect();

        let available_options = resolver
            .available_options(&selection)
            .into_iter()
            .map(|(tier, entries)| {
                let options = entries.into_iter().map(CatalogOption::from).collect();
                (tier.plural(), options)
            })
            .collect();

        Self {
            selected_values: SelectedValues {
                tiers,
                fee_amount: paise_to_rupees(application.fee_amount),
                is_fee_paid: application.is_fee_paid,
            },
            available_options,
        }
    }
}

impl From<SelectionError> for AdmissionsError {
    fn from(error: SelectionError) -> Self {
        match error {
            SelectionError::UnknownEntry { .. } => Self::NotFound(error.to_string()),
            SelectionError::Incompatible { tier, .. } => Self::IncompatibleSelection {
                field: tier,
                detail: error.to_string(),
            },
        }
    }
}

async fn find<C: ConnectionTrait>(
    db: &C,
    account_id: Uuid,
) -> AdmissionsResult<Option<course_application::Model>> {
    Ok(course_application::Entity::find()
        .filter(course_application::Column::AccountId.eq(account_id))
        .one(db)
        .await?)
}

/// Creates the empty course application for an account unless it exists.
///
/// Two requests racing to create it both succeed: the loser's unique
/// violation is swallowed and the winner's row is returned.
pub async fn find_or_create(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<course_application::Model> {
    if let Some(existing) = find(db, account_id).await? {
        return Ok(existing);
    }

    let inserted = course_application::ActiveModel {
        account_id: Set(account_id),
        fee_amount: Set(0),
        is_fee_paid: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await;

    match inserted {
        Ok(application) => Ok(application),
        Err(db_err) if is_unique_violation(&db_err) => find(db, account_id)
            .await?
            .ok_or_else(|| AdmissionsError::internal("course application vanished after insert")),
        Err(db_err) => Err(db_err.into()),
    }
}

pub async fn show(
    db: &DatabaseConnection,
    config: &Config,
    account_id: Uuid,
) -> AdmissionsResult<CourseApplicationView> {
    let application = find_or_create(db, account_id).await?;
    let catalog = CatalogIndex::load(db).await?;
    let resolver = Resolver::new(&catalog, &config.fees);

    Ok(CourseApplicationView::build(&resolver, &catalog, &application))
}

/// Applies field changes in tier order, cascades, and recomputes the fee.
///
/// Everything happens in one transaction: any rejected field leaves the stored
/// selection untouched.
pub async fn apply_changes(
    db: &DatabaseConnection,
    config: &Config,
    account_id: Uuid,
    mut changes: Vec<(CourseTier, Option<i32>)>,
) -> AdmissionsResult<CourseApplicationView> {
    find_or_create(db, account_id).await?;

    let txn = db.begin().await?;
    let application = find(&txn, account_id)
        .await?
        .ok_or_else(|| AdmissionsError::NotFound("Course application not found".to_owned()))?;
    let catalog = CatalogIndex::load(&txn).await?;
    let resolver = Resolver::new(&catalog, &config.fees);

    let before = Selection::from(&application);
    let mut selection = before;
    changes.sort_by_key(|(tier, _)| *tier);
    for (tier, value) in changes {
        let applied = resolver.apply(&mut selection, tier, value)?;
        if !applied.cleared.is_empty() {
            tracing::debug!(
                "Selecting {tier} cleared {:?} for account {account_id}",
                applied.cleared
            );
        }
    }

    let fee_amount = resolver.fee_amount(&selection);
    let application = if selection == before && fee_amount == application.fee_amount {
        application
    } else {
        let mut model = application.into_active_model();
        for tier in CourseTier::ALL {
            model.set(tier_column(tier), selection.get(tier).into());
        }
        model.fee_amount = Set(fee_amount);
        model.is_fee_paid = Set(false);
        let updated = model.update(&txn).await?;

        tracing::info!(
            "Course selection updated for account {account_id}, fee now {}",
            paise_to_rupees(fee_amount)
        );
        updated
    };

    txn.commit().await?;

    Ok(CourseApplicationView::build(&resolver, &catalog, &application))
}

/// Records the fee as paid. The only path that sets `is_fee_paid`.
pub async fn mark_paid(
    db: &DatabaseConnection,
    account_id: Uuid,
) -> AdmissionsResult<course_application::Model> {
    let application = find(db, account_id).await?.ok_or_else(|| {
        AdmissionsError::NotFound(format!("No course application for account {account_id}"))
    })?;

    let mut model = application.into_active_model();
    model.is_fee_paid = Set(true);
    let updated = model.update(db).await?;

    tracing::info!("Fee marked as paid for account {account_id}");

    Ok(updated)
}

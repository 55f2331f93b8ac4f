use std::{collections::HashMap, path::Path};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};
use serde::Deserialize;
use thiserror::Error;

use super::{CourseTier, Stream};
use crate::database::models::{catalog_entry, catalog_link};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid catalog file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown {tier} '{code}' referenced by '{referenced_by}'")]
    UnknownReference {
        tier: CourseTier,
        code: String,
        referenced_by: String,
    },
    #[error("major '{0}' must belong to at least one program")]
    OrphanMajor(String),
    #[error("{tier} code '{code}' is listed twice")]
    DuplicateCode { tier: CourseTier, code: String },
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Catalog file layout: one list per tier, keyed by the tier's plural name.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSeed {
    pub degrees: Vec<SeedEntry>,
    pub programs: Vec<SeedEntry>,
    pub majors: Vec<SeedEntry>,
    pub minors: Vec<SeedEntry>,
    pub mdcs: Vec<SeedEntry>,
    pub vacs: Vec<SeedEntry>,
    pub aecs: Vec<SeedEntry>,
    pub aocs: Vec<SeedEntry>,
}

/// One catalog entry plus the codes of the entries it is linked to.
///
/// `degrees` and `programs` name parents. `minors` and `mdcs` are only
/// meaningful on a major and name the children it offers.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub stream: Option<Stream>,
    #[serde(default)]
    pub seats_available: Option<i32>,
    #[serde(default)]
    pub seats_buffer: Option<i32>,
    #[serde(default)]
    pub entrance_exam_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub degrees: Vec<String>,
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub minors: Vec<String>,
    #[serde(default)]
    pub mdcs: Vec<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub inserted: usize,
    pub updated: usize,
    pub links: usize,
}

impl CatalogSeed {
    pub fn from_yaml(source: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml(&source)
    }

    #[must_use]
    pub fn tier(&self, tier: CourseTier) -> &[SeedEntry] {
        match tier {
            CourseTier::Degree => &self.degrees,
            CourseTier::Program => &self.programs,
            CourseTier::Major => &self.majors,
            CourseTier::Minor => &self.minors,
            CourseTier::Mdc => &self.mdcs,
            CourseTier::Vac => &self.vacs,
            CourseTier::Aec => &self.aecs,
            CourseTier::Aoc => &self.aocs,
        }
    }

    /// Every `(parent tier, parent code, child tier, child code)` link the file declares.
    fn links(&self) -> Vec<(CourseTier, &str, CourseTier, &str)> {
        let mut links = Vec::new();
        for tier in CourseTier::ALL {
            for entry in self.tier(tier) {
                for degree in &entry.degrees {
                    links.push((CourseTier::Degree, degree.as_str(), tier, entry.code.as_str()));
                }
                for program in &entry.programs {
                    links.push((CourseTier::Program, program.as_str(), tier, entry.code.as_str()));
                }
                for minor in &entry.minors {
                    links.push((tier, entry.code.as_str(), CourseTier::Minor, minor.as_str()));
                }
                for mdc in &entry.mdcs {
                    links.push((tier, entry.code.as_str(), CourseTier::Mdc, mdc.as_str()));
                }
            }
        }
        links
    }

    fn check(&self) -> Result<(), SeedError> {
        for tier in CourseTier::ALL {
            let mut seen = std::collections::HashSet::new();
            for entry in self.tier(tier) {
                if !seen.insert(entry.code.as_str()) {
                    return Err(SeedError::DuplicateCode {
                        tier,
                        code: entry.code.clone(),
                    });
                }
            }
        }

        if let Some(orphan) = self.majors.iter().find(|major| major.programs.is_empty()) {
            return Err(SeedError::OrphanMajor(orphan.code.clone()));
        }

        Ok(())
    }
}

/// Loads a catalog file into the database.
///
/// Entries are matched on `(tier, code)`: existing ones are updated in place and
/// links are only ever added, so running the same file twice changes nothing.
/// The whole file is applied in one transaction.
pub async fn seed_catalog(
    db: &DatabaseConnection,
    seed: &CatalogSeed,
) -> Result<SeedReport, SeedError> {
    seed.check()?;

    let txn = db.begin().await?;
    let mut report = SeedReport::default();
    let mut ids: HashMap<(CourseTier, String), i32> = HashMap::new();

    for tier in CourseTier::ALL {
        for entry in seed.tier(tier) {
            let existing = catalog_entry::Entity::find()
                .filter(catalog_entry::Column::Tier.eq(tier))
                .filter(catalog_entry::Column::Code.eq(entry.code.as_str()))
                .one(&txn)
                .await?;

            let mut model: catalog_entry::ActiveModel = match &existing {
                Some(existing) => existing.clone().into(),
                None => catalog_entry::ActiveModel {
                    tier: Set(tier),
                    code: Set(entry.code.clone()),
                    ..Default::default()
                },
            };
            model.name = Set(entry.name.clone());
            model.stream = Set(entry.stream);
            model.seats_available = Set(entry.seats_available);
            model.seats_buffer = Set(entry.seats_buffer);
            model.entrance_exam_at = Set(entry.entrance_exam_at);

            let saved = if existing.is_some() {
                report.updated += 1;
                model.update(&txn).await?
            } else {
                report.inserted += 1;
                model.insert(&txn).await?
            };
            ids.insert((tier, entry.code.clone()), saved.id);
        }
    }

    for (parent_tier, parent_code, child_tier, child_code) in seed.links() {
        let lookup = |tier: CourseTier, code: &str, referenced_by: &str| {
            ids.get(&(tier, code.to_owned()))
                .copied()
                .ok_or_else(|| SeedError::UnknownReference {
                    tier,
                    code: code.to_owned(),
                    referenced_by: referenced_by.to_owned(),
                })
        };
        let parent_id = lookup(parent_tier, parent_code, child_code)?;
        let child_id = lookup(child_tier, child_code, parent_code)?;

        let exists = catalog_link::Entity::find_by_id((parent_id, child_id))
            .one(&txn)
            .await?
            .is_some();
        if !exists {
            catalog_link::ActiveModel {
                parent_id: Set(parent_id),
                child_id: Set(child_id),
            }
            .insert(&txn)
            .await?;
            report.links += 1;
        }
    }

    txn.commit().await?;

    Ok(report)
}

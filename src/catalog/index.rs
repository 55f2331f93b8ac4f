use std::collections::{BTreeMap, HashMap};

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryOrder};

use super::{rules::parent_tiers, CourseTier};
use crate::database::models::{catalog_entry, catalog_link};

/// In-memory snapshot of the catalog, loaded once per request.
///
/// The catalog is small reference data, so every compatibility question is
/// answered from this snapshot instead of issuing queries per tier.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: BTreeMap<i32, catalog_entry::Model>,
    by_tier: HashMap<CourseTier, Vec<i32>>,
    parents: HashMap<i32, Vec<i32>>,
}

impl CatalogIndex {
    #[must_use]
    pub fn new(entries: Vec<catalog_entry::Model>, links: Vec<catalog_link::Model>) -> Self {
        let mut by_tier: HashMap<CourseTier, Vec<i32>> = HashMap::new();
        let mut sorted = entries;
        sorted.sort_by(|a, b| a.code.cmp(&b.code));

        for entry in &sorted {
            by_tier.entry(entry.tier).or_default().push(entry.id);
        }

        let mut parents: HashMap<i32, Vec<i32>> = HashMap::new();
        for link in links {
            parents.entry(link.child_id).or_default().push(link.parent_id);
        }

        Self {
            entries: sorted.into_iter().map(|entry| (entry.id, entry)).collect(),
            by_tier,
            parents,
        }
    }

    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, DbErr> {
        let entries = catalog_entry::Entity::find()
            .order_by_asc(catalog_entry::Column::Code)
            .all(db)
            .await?;
        let links = catalog_link::Entity::find().all(db).await?;

        Ok(Self::new(entries, links))
    }

    #[must_use]
    pub fn get(&self, id: i32) -> Option<&catalog_entry::Model> {
        self.entries.get(&id)
    }

    /// Looks up an entry, but only if it belongs to `tier`.
    #[must_use]
    pub fn get_in_tier(&self, tier: CourseTier, id: i32) -> Option<&catalog_entry::Model> {
        self.get(id).filter(|entry| entry.tier == tier)
    }

    /// Entries of a tier, ordered by code.
    pub fn tier_entries(&self, tier: CourseTier) -> impl Iterator<Item = &catalog_entry::Model> {
        self.by_tier
            .get(&tier)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entries.get(id))
    }

    /// Ids of the entries of `parent_tier` that `child` is linked under.
    pub fn parents_in_tier(
        &self,
        child: i32,
        parent_tier: CourseTier,
    ) -> impl Iterator<Item = i32> + '_ {
        self.parents
            .get(&child)
            .into_iter()
            .flatten()
            .copied()
            .filter(move |parent| {
                self.entries
                    .get(parent)
                    .is_some_and(|entry| entry.tier == parent_tier)
            })
    }

    /// Parent entries of `child` across every tier its rules look at.
    pub fn parent_entries(&self, child: &catalog_entry::Model) -> Vec<&catalog_entry::Model> {
        parent_tiers(child.tier)
            .flat_map(|tier| self.parents_in_tier(child.id, tier).collect::<Vec<_>>())
            .filter_map(|id| self.entries.get(&id))
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

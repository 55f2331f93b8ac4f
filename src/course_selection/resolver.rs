use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    catalog::{rule, CatalogIndex, CourseTier},
    config::FeesConfig,
    database::models::{catalog_entry, course_application},
};

/// Selected catalog entry id per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection([Option<i32>; 8]);

impl Selection {
    #[must_use]
    pub const fn get(&self, tier: CourseTier) -> Option<i32> {
        self.0[tier.index()]
    }

    pub fn set(&mut self, tier: CourseTier, value: Option<i32>) {
        self.0[tier.index()] = value;
    }

    /// Tiers that currently hold a selection, in tier order.
    pub fn selected_tiers(&self) -> impl Iterator<Item = CourseTier> + '_ {
        CourseTier::ALL
            .into_iter()
            .filter(|tier| self.get(*tier).is_some())
    }
}

impl From<&course_application::Model> for Selection {
    fn from(application: &course_application::Model) -> Self {
        Self([
            application.degree_id,
            application.program_id,
            application.major_id,
            application.minor_id,
            application.mdc_id,
            application.vac_id,
            application.aec_id,
            application.aoc_id,
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{tier} {id} does not exist")]
    UnknownEntry { tier: CourseTier, id: i32 },
    #[error("{tier} '{code}' is not offered for the selected {parent}")]
    Incompatible {
        tier: CourseTier,
        code: String,
        parent: CourseTier,
    },
}

/// Outcome of applying one field change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Applied {
    /// Tiers cleared because their selection no longer fits.
    pub cleared: Vec<CourseTier>,
}

/// Pure selection logic over a catalog snapshot.
///
/// Compatibility is a single predicate used for validation, cascading and the
/// options listing, so a value that is offered can always be selected and a
/// selected value is always offered.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a CatalogIndex,
    fees: &'a FeesConfig,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub const fn new(catalog: &'a CatalogIndex, fees: &'a FeesConfig) -> Self {
        Self { catalog, fees }
    }

    /// Whether the selected entry of `parent_tier` admits `entry`.
    ///
    /// An entry linked to nothing in `parent_tier` is cross-cutting and always
    /// passes. With no parent selected, `strict` decides.
    fn parent_admits(
        &self,
        entry: &catalog_entry::Model,
        parent_tier: CourseTier,
        selection: &Selection,
        strict: bool,
    ) -> bool {
        let linked: Vec<i32> = self.catalog.parents_in_tier(entry.id, parent_tier).collect();
        if linked.is_empty() {
            return true;
        }

        match selection.get(parent_tier) {
            Some(parent) => linked.contains(&parent),
            None => !strict,
        }
    }

    /// First constraining tier that rejects `entry`, if any.
    fn violated_parent(
        &self,
        entry: &catalog_entry::Model,
        selection: &Selection,
    ) -> Option<CourseTier> {
        rule(entry.tier)
            .constrained_by
            .iter()
            .copied()
            .find(|parent| !self.parent_admits(entry, *parent, selection, true))
    }

    fn is_offered(&self, entry: &catalog_entry::Model, selection: &Selection) -> bool {
        self.violated_parent(entry, selection).is_none()
            && rule(entry.tier)
                .narrowed_by
                .iter()
                .all(|parent| self.parent_admits(entry, *parent, selection, false))
    }

    /// Sets (or clears) one tier, then drops lower selections that no longer fit.
    pub fn apply(
        &self,
        selection: &mut Selection,
        tier: CourseTier,
        value: Option<i32>,
    ) -> Result<Applied, SelectionError> {
        if let Some(id) = value {
            let entry = self
                .catalog
                .get_in_tier(tier, id)
                .ok_or(SelectionError::UnknownEntry { tier, id })?;

            if let Some(parent) = self.violated_parent(entry, selection) {
                return Err(SelectionError::Incompatible {
                    tier,
                    code: entry.code.clone(),
                    parent,
                });
            }
        }

        selection.set(tier, value);

        Ok(Applied {
            cleared: self.cascade(selection),
        })
    }

    /// Clears every selection whose constraining parents reject it, walking
    /// tiers top-down so a cleared parent also clears its dependants.
    pub fn cascade(&self, selection: &mut Selection) -> Vec<CourseTier> {
        let mut cleared = Vec::new();

        for tier in CourseTier::ALL {
            let Some(id) = selection.get(tier) else {
                continue;
            };
            let keep = self
                .catalog
                .get_in_tier(tier, id)
                .is_some_and(|entry| self.violated_parent(entry, selection).is_none());

            if !keep {
                selection.set(tier, None);
                cleared.push(tier);
            }
        }

        cleared
    }

    /// Entries offered at each tier given the current selection.
    #[must_use]
    pub fn available_options(
        &self,
        selection: &Selection,
    ) -> BTreeMap<CourseTier, Vec<&'a catalog_entry::Model>> {
        CourseTier::ALL
            .into_iter()
            .map(|tier| {
                let offered = self
                    .catalog
                    .tier_entries(tier)
                    .filter(|entry| self.is_offered(entry, selection))
                    .collect();
                (tier, offered)
            })
            .collect()
    }

    /// Sum of the configured charge of every selected tier, in paise.
    #[must_use]
    pub fn fee_amount(&self, selection: &Selection) -> i64 {
        selection
            .selected_tiers()
            .map(|tier| self.fees.charge(tier))
            .sum()
    }
}

/// Renders an amount in paise as rupees with two decimals.
#[must_use]
pub fn paise_to_rupees(paise: i64) -> Decimal {
    Decimal::new(paise, 2)
}

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{CatalogIndex, CourseTier, Stream};

/// Public description of one catalog entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntryView {
    pub id: i32,
    pub code: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<Stream>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_available: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats_buffer: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrance_exam_at: Option<DateTime<Utc>>,
    /// Codes of linked parents, keyed by the parent tier's plural name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub offered_under: BTreeMap<&'static str, Vec<String>>,
}

/// The whole catalog grouped by tier, as served by `GET /catalog`.
#[must_use]
pub fn listing(catalog: &CatalogIndex) -> BTreeMap<&'static str, Vec<CatalogEntryView>> {
    CourseTier::ALL
        .into_iter()
        .map(|tier| {
            let entries = catalog
                .tier_entries(tier)
                .map(|entry| {
                    let mut offered_under: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
                    for parent in catalog.parent_entries(entry) {
                        offered_under
                            .entry(parent.tier.plural())
                            .or_default()
                            .push(parent.code.clone());
                    }
                    for codes in offered_under.values_mut() {
                        codes.sort();
                    }

                    CatalogEntryView {
                        id: entry.id,
                        code: entry.code.clone(),
                        name: entry.name.clone(),
                        stream: entry.stream,
                        seats_available: entry.seats_available,
                        seats_buffer: entry.seats_buffer,
                        total_seats: entry.total_seats(),
                        entrance_exam_at: entry.entrance_exam_at,
                        offered_under,
                    }
                })
                .collect();
            (tier.plural(), entries)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{catalog_entry, catalog_link};

    #[test]
    fn lists_every_tier_with_parent_codes_and_seats() {
        let entries = vec![
            catalog_entry::Model {
                id: 1,
                tier: CourseTier::Program,
                code: "BSC".to_owned(),
                name: "Bachelor of Science".to_owned(),
                stream: Some(Stream::Science),
                seats_available: None,
                seats_buffer: None,
                entrance_exam_at: None,
            },
            catalog_entry::Model {
                id: 2,
                tier: CourseTier::Major,
                code: "PHY".to_owned(),
                name: "Physics".to_owned(),
                stream: None,
                seats_available: Some(60),
                seats_buffer: Some(6),
                entrance_exam_at: None,
            },
        ];
        let links = vec![catalog_link::Model {
            parent_id: 1,
            child_id: 2,
        }];

        let listing = listing(&CatalogIndex::new(entries, links));

        assert_eq!(listing.len(), 8);
        assert!(listing["aocs"].is_empty());
        let major = &listing["majors"][0];
        assert_eq!(major.total_seats, Some(66));
        assert_eq!(major.offered_under["programs"], vec!["BSC".to_owned()]);
    }
}

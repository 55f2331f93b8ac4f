//! Course catalog: tiers, the rules tying them together and an in-memory
//! index used to answer compatibility questions.

mod index;
pub mod listing;
pub mod rules;
pub mod seed;
mod tier;

pub use index::CatalogIndex;
pub use listing::{listing, CatalogEntryView};
pub use rules::{rule, TierRule};
pub use seed::{seed_catalog, CatalogSeed, SeedError, SeedReport};
pub use tier::{CourseTier, Stream};

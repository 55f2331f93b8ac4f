use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A level of the course catalog hierarchy.
///
/// Variants are declared in selection order: a tier may only depend on tiers
/// declared before it, so walking [`CourseTier::ALL`] front to back always sees
/// parents before children.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CourseTier {
    #[sea_orm(string_value = "degree")]
    Degree,
    #[sea_orm(string_value = "program")]
    Program,
    #[sea_orm(string_value = "major")]
    Major,
    #[sea_orm(string_value = "minor")]
    Minor,
    /// Multi-disciplinary course
    #[sea_orm(string_value = "mdc")]
    Mdc,
    /// Value-added course
    #[sea_orm(string_value = "vac")]
    Vac,
    /// Ability-enhancement course
    #[sea_orm(string_value = "aec")]
    Aec,
    /// Add-on course
    #[sea_orm(string_value = "aoc")]
    Aoc,
}

impl CourseTier {
    pub const ALL: [Self; 8] = [
        Self::Degree,
        Self::Program,
        Self::Major,
        Self::Minor,
        Self::Mdc,
        Self::Vac,
        Self::Aec,
        Self::Aoc,
    ];

    /// Key used for this tier's list in `available_options` and `GET /catalog`.
    #[must_use]
    pub const fn plural(&self) -> &'static str {
        match self {
            Self::Degree => "degrees",
            Self::Program => "programs",
            Self::Major => "majors",
            Self::Minor => "minors",
            Self::Mdc => "mdcs",
            Self::Vac => "vacs",
            Self::Aec => "aecs",
            Self::Aoc => "aocs",
        }
    }

    #[must_use]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

/// Applicant stream a program or major expects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, Display,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stream {
    #[sea_orm(string_value = "science")]
    Science,
    #[sea_orm(string_value = "arts")]
    Arts,
    #[sea_orm(string_value = "commerce")]
    Commerce,
}

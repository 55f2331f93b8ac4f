//! `SeaORM` Entity for an applicant's course selection and fee state

use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};

use crate::catalog::CourseTier;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "course_application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub account_id: Uuid,
    pub degree_id: Option<i32>,
    pub program_id: Option<i32>,
    pub major_id: Option<i32>,
    pub minor_id: Option<i32>,
    pub mdc_id: Option<i32>,
    pub vac_id: Option<i32>,
    pub aec_id: Option<i32>,
    pub aoc_id: Option<i32>,
    /// Amount due in paise
    pub fee_amount: i64,
    pub is_fee_paid: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        if insert && self.created_at.is_not_set() {
            self.created_at = Set(now);
        }
        self.updated_at = Set(now);
        Ok(self)
    }
}

/// Column holding the selected entry for a tier.
#[must_use]
pub const fn tier_column(tier: CourseTier) -> Column {
    match tier {
        CourseTier::Degree => Column::DegreeId,
        CourseTier::Program => Column::ProgramId,
        CourseTier::Major => Column::MajorId,
        CourseTier::Minor => Column::MinorId,
        CourseTier::Mdc => Column::MdcId,
        CourseTier::Vac => Column::VacId,
        CourseTier::Aec => Column::AecId,
        CourseTier::Aoc => Column::AocId,
    }
}

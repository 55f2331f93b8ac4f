//! `SeaORM` Entity for 10th and 12th grade school results

use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::Serialize;

use crate::catalog::Stream;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "education_profile")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_serializing)]
    pub id: i32,
    #[sea_orm(unique)]
    pub account_id: Uuid,
    #[sea_orm(unique)]
    #[serde(skip_serializing)]
    pub application_profile_id: i32,
    pub school_name_10th: Option<String>,
    pub school_board_10th: Option<String>,
    pub subject1_marks_10th: Option<i16>,
    pub subject2_marks_10th: Option<i16>,
    pub subject3_marks_10th: Option<i16>,
    pub subject4_marks_10th: Option<i16>,
    pub subject5_marks_10th: Option<i16>,
    pub subject6_marks_10th: Option<i16>,
    pub percentage_10th: Option<f64>,
    pub is_appearing: bool,
    pub school_name_12th: Option<String>,
    pub school_board_12th: Option<String>,
    pub subject_stream: Option<Stream>,
    pub subject1_marks_12th: Option<i16>,
    pub subject2_marks_12th: Option<i16>,
    pub subject3_marks_12th: Option<i16>,
    pub subject4_marks_12th: Option<i16>,
    pub subject5_marks_12th: Option<i16>,
    pub subject6_marks_12th: Option<i16>,
    pub percentage_12th: Option<f64>,
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
    #[sea_orm(
        belongs_to = "super::application_profile::Entity",
        from = "Column::ApplicationProfileId",
        to = "super::application_profile::Column::Id",
        on_delete = "Cascade"
    )]
    ApplicationProfile,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::application_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationProfile.def()
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

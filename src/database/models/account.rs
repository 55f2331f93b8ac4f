//! `SeaORM` Entity for applicant accounts

use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admitted: bool,
    pub admission_date: Option<DateTimeUtc>,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::application_profile::Entity")]
    ApplicationProfile,
    #[sea_orm(has_one = "super::education_profile::Entity")]
    EducationProfile,
    #[sea_orm(has_one = "super::course_application::Entity")]
    CourseApplication,
}

impl Related<super::application_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationProfile.def()
    }
}

impl Related<super::education_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EducationProfile.def()
    }
}

impl Related<super::course_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseApplication.def()
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

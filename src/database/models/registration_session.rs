//! `SeaORM` Entity for pending registrations awaiting OTP verification

use chrono::Utc;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registration_session")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub email_otp: String,
    pub phone_otp: String,
    pub otp_expires_at: DateTimeUtc,
    pub is_email_verified: bool,
    pub is_phone_verified: bool,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    #[must_use]
    pub fn is_otp_expired(&self) -> bool {
        Utc::now() > self.otp_expires_at
    }

    #[must_use]
    pub const fn is_fully_verified(&self) -> bool {
        self.is_email_verified && self.is_phone_verified
    }
}

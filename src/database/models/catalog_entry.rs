//! `SeaORM` Entity for every course catalog item, tagged with its tier

use sea_orm::entity::prelude::*;

use crate::catalog::{CourseTier, Stream};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tier: CourseTier,
    pub code: String,
    pub name: String,
    pub stream: Option<Stream>,
    pub seats_available: Option<i32>,
    pub seats_buffer: Option<i32>,
    pub entrance_exam_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Seats offered including the buffer, for majors that track seats.
    #[must_use]
    pub fn total_seats(&self) -> Option<i32> {
        match (self.seats_available, self.seats_buffer) {
            (None, None) => None,
            (available, buffer) => Some(available.unwrap_or(0) + buffer.unwrap_or(0)),
        }
    }
}

pub use sea_orm_migration::prelude::*;

mod m20251001_090000_create_accounts;
mod m20251001_091500_create_catalog;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251001_090000_create_accounts::Migration),
            Box::new(m20251001_091500_create_catalog::Migration),
        ]
    }
}

pub struct Migrator;

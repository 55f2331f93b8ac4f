use std::{cmp, error::Error, process};

use sea_orm::DatabaseConnection;
use sea_orm_migration::{MigratorTrait, Migration};

use crate::{
    cli::MigrateAction,
    config::Config,
    database::{setup_database_connection, Migrator},
};

pub async fn handle_migrate_command(config: &Config, action: MigrateAction) {
    if let Err(e) = run(config, action).await {
        eprintln!("❌ Migration failed: {e}");
        process::exit(1);
    }
}

async fn run(config: &Config, action: MigrateAction) -> Result<(), Box<dyn Error>> {
    let db = setup_database_connection(&config.database).await?;
    handle_migration_command(&db, action).await
}

fn print_names<'a>(migrations: impl Iterator<Item = &'a Migration>, marker: &str) {
    for migration in migrations {
        println!("  {marker} {}", migration.name());
    }
}

/// Last `steps` entries of the applied list, clamped to what exists.
fn tail(applied: &[Migration], steps: u32) -> &[Migration] {
    let count = cmp::min(steps as usize, applied.len());
    &applied[applied.len() - count..]
}

pub async fn handle_migration_command(
    db: &DatabaseConnection,
    action: MigrateAction,
) -> Result<(), Box<dyn Error>> {
    match action {
        MigrateAction::Up { steps } => {
            let pending = Migrator::get_pending_migrations(db).await?;
            if pending.is_empty() {
                println!("✅ Schema is up to date");
                return Ok(());
            }

            let count = steps.map_or(pending.len(), |steps| {
                cmp::min(steps as usize, pending.len())
            });
            println!("Applying {count} of {} pending migration(s):", pending.len());
            print_names(pending[..count].iter(), "📄");
            println!();

            Migrator::up(db, steps).await?;
            println!("✅ Migrations applied");
        }
        MigrateAction::Down { steps } => {
            let applied = Migrator::get_applied_migrations(db).await?;
            if applied.is_empty() {
                println!("❌ Nothing to roll back");
                return Ok(());
            }

            println!("Rolling back:");
            print_names(tail(&applied, steps).iter().rev(), "📄");
            println!();

            Migrator::down(db, Some(steps)).await?;
            println!("✅ Rollback completed");
        }
        MigrateAction::Status => {
            let applied = Migrator::get_applied_migrations(db).await?;
            let pending = Migrator::get_pending_migrations(db).await?;

            println!("📋 Applied migrations:");
            print_names(applied.iter(), "✓");
            if pending.is_empty() {
                println!("✅ No pending migrations");
            } else {
                println!("📋 Pending migrations:");
                print_names(pending.iter(), "-");
            }
        }
        MigrateAction::Reset => {
            println!("🔄 Rolling back and reapplying every migration (all data is lost)...");

            let applied = Migrator::get_applied_migrations(db).await?;
            let applied_count =
                u32::try_from(applied.len()).map_err(|_| "Too many migrations to reset")?;
            if applied_count > 0 {
                print_names(applied.iter().rev(), "↩");
                Migrator::down(db, Some(applied_count)).await?;
            }

            let pending = Migrator::get_pending_migrations(db).await?;
            print_names(pending.iter(), "📄");
            Migrator::up(db, None).await?;
            println!("✅ Schema rebuilt");
        }
        MigrateAction::Reapply { steps } => {
            let applied = Migrator::get_applied_migrations(db).await?;
            if applied.is_empty() {
                println!("❌ Nothing to reapply");
                return Ok(());
            }

            println!("Reapplying:");
            print_names(tail(&applied, steps).iter(), "🔁");
            Migrator::down(db, Some(steps)).await?;
            Migrator::up(db, Some(steps)).await?;
            println!("✅ Reapply completed");
        }
    }

    Ok(())
}

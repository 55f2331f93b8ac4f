use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::config::DatabaseConfig;

pub mod migrations;
pub mod models;

pub use migrations::Migrator;

/// Connects and runs pending migrations in the background.
///
/// The receiver resolves once migrations finish, so callers can keep serving
/// liveness probes meanwhile.
pub async fn setup_database(
    db_config: &DatabaseConfig,
) -> Result<(DatabaseConnection, oneshot::Receiver<Result<(), DbErr>>), DbErr> {
    let connection = setup_database_connection(db_config).await?;
    let migrations_connection = connection.clone();

    let (sender, receiver) = oneshot::channel();

    tokio::spawn(async move {
        let migration_result = Migrator::up(&migrations_connection, None).await;
        let _ = sender.send(migration_result);
    });

    Ok((connection, receiver))
}

pub async fn setup_database_connection(
    db_config: &DatabaseConfig,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(db_config.url.clone());

    options.sqlx_logging(false);
    // Every connection to `sqlite::memory:` opens its own empty database.
    if db_config.is_sqlite() && db_config.url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(db_config.pool_size);
    }

    debug!("Connecting to database at: {}", &db_config.url);

    sea_orm::Database::connect(options).await
}

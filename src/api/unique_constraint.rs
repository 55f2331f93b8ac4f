use sea_orm::{DbErr, SqlErr};

use crate::error::AdmissionsError;

/// Turns a unique violation on `column` into a `Conflict` naming `field`.
///
/// Postgres reports the index name and SQLite the `table.column` pair, so the
/// check matches on the column name which appears in both. Any other database
/// error is passed through unchanged.
pub fn handle_unique_constraint_violation(
    field: &'static str,
    column: &'static str,
) -> impl Fn(DbErr) -> AdmissionsError {
    move |db_err: DbErr| match db_err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains(column) => {
            AdmissionsError::Conflict(format!("The value for field '{field}' must be unique."))
        }
        _ => AdmissionsError::Database(db_err),
    }
}

/// True when `db_err` is any unique violation.
#[must_use]
pub fn is_unique_violation(db_err: &DbErr) -> bool {
    matches!(db_err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

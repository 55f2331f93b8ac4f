use time::{format_description::BorrowedFormatItem, macros::format_description, UtcOffset};
use tracing_subscriber::{fmt::time::OffsetTime, EnvFilter};

use crate::cli::Commands;

const TIMESTAMP: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:2]");

/// Default level per command. `RUST_LOG` overrides it.
fn default_level<'a>(command: Option<&Commands>, server_log_level: &'a str) -> &'a str {
    match command {
        Some(Commands::Migrate { .. } | Commands::Db { .. } | Commands::Catalog { .. }) => "warn",
        Some(Commands::Version | Commands::GenerateJwtSecret) => "error",
        Some(Commands::Serve) | None => server_log_level,
    }
}

pub fn setup_tracing_for_command(command: Option<&Commands>, server_log_level: &str) {
    let mut env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(command, server_log_level)));
    for directive in ["sqlx::postgres::notice=warn", "sea_orm_migration::migrator=warn"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_ansi(true)
        .with_timer(OffsetTime::new(
            UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
            TIMESTAMP,
        ))
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maintenance_commands_stay_quiet() {
        assert_eq!(default_level(Some(&Commands::Version), "info"), "error");
        assert_eq!(
            default_level(
                Some(&Commands::Catalog {
                    action: crate::cli::CatalogAction::Show
                }),
                "info"
            ),
            "warn"
        );
        assert_eq!(default_level(None, "debug"), "debug");
    }
}

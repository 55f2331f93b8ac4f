use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"))]
#[command(about = env!("CARGO_PKG_DESCRIPTION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the admissions API server (the default when no command is given)
    Serve,
    /// Apply or roll back schema migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        action: Option<DbAction>,
    },
    /// Course catalog reference data
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Print a random secret suitable for `jwt.secret`
    GenerateJwtSecret,
    /// Print the build version
    Version,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Load degrees, programs and courses from a YAML file
    Seed {
        /// Path to the catalog file
        file: PathBuf,
    },
    /// Print the catalog currently in the database
    Show,
}

#[derive(Subcommand)]
pub enum DbAction {
    /// Open an interactive database console (psql, or sqlite3 for SQLite)
    Console,
    /// Drop and recreate the database, then run all migrations (Postgres only)
    Reset,
}

#[derive(Subcommand)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up {
        /// Apply at most this many (all pending when omitted)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// How many to roll back
        #[arg(short, long, default_value = "1")]
        steps: u32,
    },
    /// List migrations and whether each is applied
    Status,
    /// Roll back everything, then apply everything
    Reset,
    /// Roll back the latest migrations and apply them again
    Reapply {
        /// How many of the latest to redo
        #[arg(short, long, default_value = "1")]
        steps: u32,
    },
}

use std::{env, str::FromStr as _};

use clap::Parser as _;
use config_rs::{Config as ConfigRs, ConfigError};
use tracing::{debug, trace};

use crate::{
    cli::{Cli, Commands, DbAction},
    commands::{catalog, db, db_reset, generate_secret, migrate, serve, version},
    config::Config,
    environment::Environment,
    setup_tracing::setup_tracing_for_command,
};

const ENVIRONMENT_VARIABLE: &str = "APP_ENVIRONMENT";

pub async fn boot() {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        version::print_version_info();
        return;
    }

    let environment = set_environment();
    let config = match read_config(&environment) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration for {environment}: {e}");
            std::process::exit(1);
        }
    };

    setup_tracing_for_command(cli.command.as_ref(), &config.tracing.log_level);

    debug!("Environment set to: {:?}", environment);
    trace!("Configuration loaded: {:?}", config);

    handle_command(environment, config, cli).await;
}

#[must_use]
pub fn set_environment() -> Environment {
    env::var(ENVIRONMENT_VARIABLE)
        .ok()
        .and_then(|s| Environment::from_str(&s).ok())
        .unwrap_or_default()
}

/// Layers `config/{environment}.yaml` under `APP_*` variables, with `__`
/// separating nested keys (`APP_JWT__SECRET`).
pub fn read_config(environment: &Environment) -> Result<Config, ConfigError> {
    let config_file_name = environment.config_file();

    trace!("Reading configuration from: {}", config_file_name);

    ConfigRs::builder()
        .add_source(config_rs::File::with_name(&config_file_name))
        .add_source(config_rs::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

pub async fn handle_command(environment: Environment, config: Config, cli: Cli) {
    match cli.command {
        Some(Commands::Migrate { action }) => {
            migrate::handle_migrate_command(&config, action).await;
        }
        Some(Commands::Db { action }) => match action {
            Some(DbAction::Console) | None => db::handle_db_console_command(&config.database),
            Some(DbAction::Reset) => db_reset::handle_db_reset_command(&config).await,
        },
        Some(Commands::Catalog { action }) => {
            catalog::handle_catalog_command(&config, action).await;
        }
        Some(Commands::GenerateJwtSecret) => generate_secret::handle_generate_secret_command(),
        Some(Commands::Version) => version::print_version_info(),
        Some(Commands::Serve) | None => serve::handle_serve_command(environment, config).await,
    }
}

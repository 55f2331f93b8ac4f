use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::{
    config::Config, environment::Environment, mailer::Mailer, rate_limiting::RateLimitState,
    sms::SmsSender,
};

/// Shared state handed to every request handler.
#[derive(Clone, Debug)]
pub struct App {
    pub config: Config,
    pub environment: Environment,
    pub db: DatabaseConnection,
    pub mailer: Mailer,
    pub sms: SmsSender,
    pub rate_limit_state: RateLimitState,
}

impl FromRef<App> for Config {
    fn from_ref(app: &App) -> Self {
        app.config.clone()
    }
}

impl FromRef<App> for DatabaseConnection {
    fn from_ref(app: &App) -> Self {
        app.db.clone()
    }
}

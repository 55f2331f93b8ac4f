use std::{error::Error, net::SocketAddr, process, time::Duration};

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{
    api::health_checks::ok,
    app::App,
    config::{Config, EmailConfig, SmsConfig},
    database::setup_database,
    environment::Environment, mailer::Mailer, rate_limiting::RateLimitState, router::router,
    sms::SmsSender,
};

const RATE_LIMIT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

pub async fn handle_serve_command(environment: Environment, config: Config) {
    if let Err(e) = serve(environment, config).await {
        error!("❌ Server failed: {}", e);
        process::exit(1);
    }
}

async fn serve(environment: Environment, config: Config) -> Result<(), Box<dyn Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    // Probes get a liveness answer while migrations are still running.
    let listener = TcpListener::bind(addr).await?;
    let liveness_server = tokio::spawn(async move {
        let liveness_router = Router::new().route("/liveness", get(ok));
        axum::serve(listener, liveness_router).await
    });

    let (db, migrations) = setup_database(&config.database).await?;
    let migrated: Result<(), Box<dyn Error>> = match migrations.await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err("database setup channel closed unexpectedly".into()),
    };
    liveness_server.abort();
    let _ = liveness_server.await;
    if let Err(e) = migrated {
        return Err(format!("database setup failed: {e}").into());
    }
    info!("✅ Database is ready!");

    let rate_limit_state = RateLimitState::new(config.rate_limiting.clone());
    let sweeper = rate_limit_state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sweeper.cleanup_expired_entries();
        }
    });

    if environment.is_production() {
        if matches!(config.email, EmailConfig::Mock) {
            warn!("Email is mocked in production, OTP emails will not be delivered");
        }
        if !matches!(config.sms, SmsConfig::Log) {
            warn!("SMS is mocked in production, OTP messages will not be delivered");
        }
    }

    let app = App {
        mailer: Mailer::from_config(&config.email)?,
        sms: SmsSender::from_config(&config.sms),
        config,
        environment,
        db,
        rate_limit_state,
    };

    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Server starting on http://{}", addr);
    axum::serve(
        listener,
        router(app).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

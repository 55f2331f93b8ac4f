use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    api::health_checks, app::App, handlers::app_router,
    rate_limiting::{rate_limit_middleware, ActionLimiter, RateLimitAction},
};

/// Full HTTP surface: probes at the root, the API under `/api`.
pub fn router(app: App) -> Router {
    let mut api_router = Router::new().nest("/api", app_router(app.clone()));

    if app.config.rate_limiting.enabled {
        api_router = api_router.layer(axum::middleware::from_fn_with_state(
            ActionLimiter::new(&app.rate_limit_state, RateLimitAction::DEFAULT),
            rate_limit_middleware,
        ));
    }

    Router::new()
        .route("/liveness", get(health_checks::ok))
        .route("/readiness", get(health_checks::readiness))
        .with_state(app.db.clone())
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
}

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put, MethodRouter},
    Router,
};

use crate::{
    api::health_checks,
    app::App,
    rate_limiting::{rate_limit_middleware, ActionLimiter, RateLimitAction},
};

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod course_application;
pub mod profile;
pub mod registration;

/// Wraps a route in the limiter for `action` when rate limiting is enabled.
fn limited(app: &App, action: &str, route: MethodRouter<App>) -> MethodRouter<App> {
    if app.config.rate_limiting.enabled {
        route.route_layer(from_fn_with_state(
            ActionLimiter::new(&app.rate_limit_state, action),
            rate_limit_middleware,
        ))
    } else {
        route
    }
}

/// Routes served under `/api`.
pub fn app_router(app: App) -> Router {
    Router::new()
        .route("/health", get(health_checks::health))
        .route(
            "/register",
            limited(&app, RateLimitAction::REGISTER, post(registration::register)),
        )
        .route(
            "/verify-otp",
            limited(&app, RateLimitAction::OTP_VERIFY, post(registration::verify_otp)),
        )
        .route(
            "/resend-otp",
            limited(&app, RateLimitAction::OTP_RESEND, post(registration::resend_otp)),
        )
        .route("/set-password", post(registration::set_password))
        .route(
            "/login",
            limited(&app, RateLimitAction::LOGIN, post(auth::login)),
        )
        .route("/token/refresh", post(auth::refresh))
        .route("/me", get(auth::me).put(auth::update_me))
        .route(
            "/user-application",
            get(profile::show_application)
                .put(profile::replace_application)
                .post(profile::create_exists),
        )
        .route(
            "/user-education-details",
            get(profile::show_education)
                .put(profile::replace_education)
                .post(profile::create_exists),
        )
        .route(
            "/course-application",
            get(course_application::show).put(course_application::update),
        )
        .route("/catalog", get(catalog::index))
        .route(
            "/admin/course-applications/{account_id}/mark-paid",
            post(admin::mark_fee_paid),
        )
        .route(
            "/admin/accounts/{account_id}/admission",
            put(admin::set_admission),
        )
        .with_state(app)
}

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Map;
use tracing::{debug, instrument};

use super::{action::RateLimitAction, rate_limit_state::RateLimitState};
use crate::error::error_body;

/// Limiter state bound to one action, used as middleware state.
#[derive(Debug, Clone)]
pub struct ActionLimiter {
    state: RateLimitState,
    action: RateLimitAction,
}

impl ActionLimiter {
    pub fn new(state: &RateLimitState, action: impl Into<RateLimitAction>) -> Self {
        Self {
            state: state.clone(),
            action: action.into(),
        }
    }
}

/// Counts the request against the limiter's action for the client address.
///
/// Requests without a peer address (e.g. in-process test servers) pass
/// through unchecked. Over-limit requests get 429 with `Retry-After`.
#[instrument(skip_all, fields(ip, action))]
pub async fn rate_limit_middleware(
    State(limiter): State<ActionLimiter>,
    req: Request,
    next: Next,
) -> Response {
    tracing::Span::current().record("action", limiter.action.as_str());

    let Some(ip) = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0.ip())
    else {
        debug!("No peer address on request, skipping rate limit");
        return next.run(req).await;
    };

    tracing::Span::current().record("ip", tracing::field::display(&ip));

    match limiter.state.check_rate_limit(ip, &limiter.action) {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            debug!(
                retry_after_secs = retry_after.as_secs(),
                "Rate limit exceeded, returning 429"
            );

            let body = error_body(
                "rate_limited",
                "Too many requests, please try again later",
                Map::new(),
            );
            let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after.as_secs().max(1)),
            );
            response
        }
    }
}

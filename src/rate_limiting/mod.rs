pub mod action;
pub mod middleware;
pub mod rate_limit_state;

pub use action::RateLimitAction;
pub use middleware::{rate_limit_middleware, ActionLimiter};
pub use rate_limit_state::RateLimitState;

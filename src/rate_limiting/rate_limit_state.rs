use std::{
    collections::{HashMap, VecDeque},
    net::IpAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::action::RateLimitAction;

/// At most `max_requests` within any `window_secs` span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitWindow {
    pub window_secs: u64,
    pub max_requests: u32,
}

impl LimitWindow {
    const fn duration(self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

/// Windows checked together for one action. A short window catches bursts,
/// a long one catches slow guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLimit {
    pub windows: Vec<LimitWindow>,
}

impl ActionLimit {
    fn from_pairs(pairs: &[(u64, u32)]) -> Self {
        Self {
            windows: pairs
                .iter()
                .map(|&(window_secs, max_requests)| LimitWindow {
                    window_secs,
                    max_requests,
                })
                .collect(),
        }
    }

    fn longest_window(&self) -> Duration {
        self.windows
            .iter()
            .map(|window| window.duration())
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Limit for actions without an entry in `actions`
    #[serde(default = "RateLimitConfig::default_fallback")]
    pub fallback: ActionLimit,
    /// Each repeated violation multiplies the penalty by this
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default = "RateLimitConfig::default_actions")]
    pub actions: HashMap<String, ActionLimit>,
}

const fn default_enabled() -> bool {
    true
}

const fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            fallback: Self::default_fallback(),
            backoff_multiplier: default_backoff_multiplier(),
            actions: Self::default_actions(),
        }
    }
}

impl RateLimitConfig {
    fn default_fallback() -> ActionLimit {
        ActionLimit::from_pairs(&[(5, 10), (60, 100)])
    }

    /// Built-in limits for the registration and login endpoints.
    ///
    /// OTP attempts get a tight burst window so codes cannot be guessed quickly
    /// from one address; there is no per-session lockout.
    fn default_actions() -> HashMap<String, ActionLimit> {
        HashMap::from([
            (
                RateLimitAction::REGISTER.to_owned(),
                ActionLimit::from_pairs(&[(5, 2), (60, 5), (3600, 20)]),
            ),
            (
                RateLimitAction::OTP_VERIFY.to_owned(),
                ActionLimit::from_pairs(&[(5, 3), (60, 10), (3600, 60)]),
            ),
            (
                RateLimitAction::OTP_RESEND.to_owned(),
                ActionLimit::from_pairs(&[(30, 1), (3600, 10)]),
            ),
            (
                RateLimitAction::LOGIN.to_owned(),
                ActionLimit::from_pairs(&[(5, 5), (60, 20), (3600, 100)]),
            ),
        ])
    }

    #[must_use]
    pub fn limit_for(&self, action: &RateLimitAction) -> &ActionLimit {
        self.actions.get(action.as_str()).unwrap_or(&self.fallback)
    }
}

/// Recent requests of one address for one action.
#[derive(Debug, Default)]
struct History {
    /// Accepted requests, oldest first.
    accepted: VecDeque<Instant>,
    strikes: u32,
    blocked_until: Option<Instant>,
}

impl History {
    fn remaining_block(&self, now: Instant) -> Option<Duration> {
        self.blocked_until
            .filter(|until| *until > now)
            .map(|until| until - now)
    }

    fn forget_before(&mut self, cutoff: Instant) {
        while self.accepted.front().is_some_and(|at| *at <= cutoff) {
            self.accepted.pop_front();
        }
    }

    fn count_since(&self, cutoff: Instant) -> usize {
        self.accepted.iter().rev().take_while(|at| **at > cutoff).count()
    }

    /// Accepts the request, or blocks the client and returns the penalty.
    ///
    /// The penalty is the exceeded window's length, multiplied by
    /// `backoff_multiplier` for every earlier strike.
    fn admit(
        &mut self,
        now: Instant,
        limit: &ActionLimit,
        backoff_multiplier: f64,
    ) -> Option<Duration> {
        if let Some(cutoff) = now.checked_sub(limit.longest_window()) {
            self.forget_before(cutoff);
        }

        let exceeded = limit.windows.iter().find(|window| {
            let count = match now.checked_sub(window.duration()) {
                Some(cutoff) => self.count_since(cutoff),
                None => self.accepted.len(),
            };
            count >= window.max_requests as usize
        });

        let Some(window) = exceeded else {
            self.accepted.push_back(now);
            return None;
        };

        self.strikes += 1;
        let exponent = i32::try_from(self.strikes - 1).unwrap_or(i32::MAX);
        let penalty = window
            .duration()
            .mul_f64(backoff_multiplier.powi(exponent));
        self.blocked_until = Some(now + penalty);

        warn!(
            window_secs = window.window_secs,
            max_requests = window.max_requests,
            strikes = self.strikes,
            penalty_secs = penalty.as_secs(),
            "Rate limit exceeded"
        );

        Some(penalty)
    }

    fn is_idle(&self, now: Instant, idle_for: Duration) -> bool {
        self.remaining_block(now).is_none()
            && self
                .accepted
                .back()
                .is_none_or(|last| now.duration_since(*last) > idle_for)
    }
}

/// Per-address, per-action request history kept in memory.
///
/// Each action is counted separately, so hammering `otp_verify` does not eat
/// into the budget for `login` from the same address.
#[derive(Clone, Debug)]
pub struct RateLimitState {
    config: Arc<RateLimitConfig>,
    clients: Arc<DashMap<(IpAddr, RateLimitAction), History>>,
}

impl RateLimitState {
    const IDLE_AFTER: Duration = Duration::from_secs(3600);

    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config: Arc::new(config),
            clients: Arc::new(DashMap::new()),
        }
    }

    /// Records a request, or returns how long the caller must wait.
    pub fn check_rate_limit(&self, ip: IpAddr, action: &RateLimitAction) -> Result<(), Duration> {
        if !self.config.enabled {
            return Ok(());
        }

        let now = Instant::now();
        let mut history = self.clients.entry((ip, action.clone())).or_default();

        if let Some(remaining) = history.remaining_block(now) {
            debug!(%ip, action = action.as_str(), "Client is still blocked");
            return Err(remaining);
        }

        let limit = self.config.limit_for(action);
        match history.admit(now, limit, self.config.backoff_multiplier) {
            Some(penalty) => Err(penalty),
            None => Ok(()),
        }
    }

    /// Drops histories that are unblocked and have been quiet for an hour.
    pub fn cleanup_expired_entries(&self) {
        let now = Instant::now();
        self.clients
            .retain(|_, history| !history.is_idle(now, Self::IDLE_AFTER));
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.clients.len()
    }
}

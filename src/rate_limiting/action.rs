/// Name of the bucket a request is counted against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RateLimitAction(pub String);

impl RateLimitAction {
    pub const DEFAULT: &'static str = "default";
    pub const REGISTER: &'static str = "register";
    pub const OTP_VERIFY: &'static str = "otp_verify";
    pub const OTP_RESEND: &'static str = "otp_resend";
    pub const LOGIN: &'static str = "login";

    pub fn new(action: impl Into<String>) -> Self {
        Self(action.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RateLimitAction {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

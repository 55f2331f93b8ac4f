use serde::{Deserialize, Deserializer, Serialize};

use lettre::message::Mailbox;

use crate::catalog::CourseTier;
pub use crate::rate_limiting::rate_limit_state::RateLimitConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub tracing: TracingConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub email: EmailConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub password_policy: PasswordPolicyConfig,
    #[serde(default)]
    pub fees: FeesConfig,
    #[serde(default)]
    pub rate_limiting: RateLimitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_expiration_minutes")]
    pub access_expiration_minutes: u64,
    #[serde(default = "default_refresh_expiration_days")]
    pub refresh_expiration_days: u64,
}

const fn default_access_expiration_minutes() -> u64 {
    60
}

const fn default_refresh_expiration_days() -> u64 {
    7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmailConfig {
    /// Mock mailer that captures emails for testing
    Mock,
    /// Real SMTP configuration for sending emails
    Smtp {
        host: String,
        port: u16,
        #[serde(deserialize_with = "deserialize_mailbox")]
        sender: Mailbox,
        username: Option<String>,
        password: Option<String>,
        #[serde(default = "default_use_tls")]
        use_tls: bool,
    },
}

fn deserialize_mailbox<'de, D>(deserializer: D) -> Result<Mailbox, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

fn default_use_tls() -> bool {
    true
}

/// Where phone OTPs go. There is no SMS gateway integration; `log` writes the
/// message to the tracing output and `mock` keeps it in memory for tests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SmsConfig {
    #[default]
    Log,
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Lifetime of a pending registration session
    #[serde(default = "default_registration_expiry_hours")]
    pub expiry_hours: u64,
    /// Number of digits in each OTP
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,
    /// Lifetime of an issued OTP pair
    #[serde(default = "default_otp_expiry_minutes")]
    pub otp_expiry_minutes: u64,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            expiry_hours: default_registration_expiry_hours(),
            otp_length: default_otp_length(),
            otp_expiry_minutes: default_otp_expiry_minutes(),
        }
    }
}

const fn default_registration_expiry_hours() -> u64 {
    24
}

const fn default_otp_length() -> usize {
    6
}

const fn default_otp_expiry_minutes() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicyConfig {
    #[serde(default = "default_min_password_length")]
    pub min_length: usize,
    #[serde(default = "default_true")]
    pub require_letter: bool,
    #[serde(default = "default_true")]
    pub require_digit: bool,
}

impl Default for PasswordPolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_password_length(),
            require_letter: true,
            require_digit: true,
        }
    }
}

const fn default_min_password_length() -> usize {
    8
}

const fn default_true() -> bool {
    true
}

/// Fixed charge per selected course tier, in paise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeesConfig {
    pub degree: i64,
    pub program: i64,
    pub major: i64,
    pub minor: i64,
    pub mdc: i64,
    pub vac: i64,
    pub aec: i64,
    pub aoc: i64,
}

impl FeesConfig {
    #[must_use]
    pub const fn charge(&self, tier: CourseTier) -> i64 {
        match tier {
            CourseTier::Degree => self.degree,
            CourseTier::Program => self.program,
            CourseTier::Major => self.major,
            CourseTier::Minor => self.minor,
            CourseTier::Mdc => self.mdc,
            CourseTier::Vac => self.vac,
            CourseTier::Aec => self.aec,
            CourseTier::Aoc => self.aoc,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TracingConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_sqlite(&self) -> bool {
        self.url.starts_with("sqlite:")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

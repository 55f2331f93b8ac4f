use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT payload. `sub` is the account id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
    pub kind: TokenKind,
}

impl Claims {
    pub fn account_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Signs an HS256 token of the given kind for an account.
///
/// Access tokens live `access_expiration_minutes`, refresh tokens
/// `refresh_expiration_days`.
pub fn generate_token(
    config: &JwtConfig,
    account_id: Uuid,
    kind: TokenKind,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now().timestamp() as usize;
    let lifetime_seconds = match kind {
        TokenKind::Access => config.access_expiration_minutes * 60,
        TokenKind::Refresh => config.refresh_expiration_days * 86_400,
    };

    let claims = Claims {
        sub: account_id.to_string(),
        exp: now + lifetime_seconds as usize,
        iat: now,
        kind,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Checks signature, expiry and kind, then returns the claims.
pub fn verify_token(
    config: &JwtConfig,
    token: &str,
    expected: TokenKind,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?
    .claims;

    if claims.kind != expected {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
    }

    Ok(claims)
}

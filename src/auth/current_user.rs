use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    auth::jwt::{self, TokenKind},
    config::Config,
    database::models::account,
    error::AdmissionsError,
};

/// The account behind a valid access token.
///
/// Rejects with `unauthorized` when the header is missing, the token is not a
/// valid access token, or the account is gone or deactivated.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account: account::Model,
}

impl std::ops::Deref for CurrentUser {
    type Target = account::Model;

    fn deref(&self) -> &Self::Target {
        &self.account
    }
}

fn unauthorized() -> AdmissionsError {
    AdmissionsError::Unauthorized(
        "Authentication credentials were not provided or are invalid".to_owned(),
    )
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    Config: FromRef<S>,
    DatabaseConnection: FromRef<S>,
{
    type Rejection = AdmissionsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(unauthorized)?;

        let config = Config::from_ref(state);
        let claims = jwt::verify_token(&config.jwt, token, TokenKind::Access)
            .map_err(|_| unauthorized())?;
        let account_id = claims.account_id().map_err(|_| unauthorized())?;

        let db = DatabaseConnection::from_ref(state);
        let account = account::Entity::find_by_id(account_id)
            .one(&db)
            .await?
            .filter(|account| account.is_active)
            .ok_or_else(unauthorized)?;

        Ok(Self { account })
    }
}

/// A [`CurrentUser`] whose account is staff.
#[derive(Debug, Clone)]
pub struct StaffUser(pub CurrentUser);

impl<S> FromRequestParts<S> for StaffUser
where
    S: Send + Sync,
    Config: FromRef<S>,
    DatabaseConnection: FromRef<S>,
{
    type Rejection = AdmissionsError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;

        if !(user.is_staff || user.is_superuser) {
            return Err(AdmissionsError::Forbidden(
                "Staff access is required".to_owned(),
            ));
        }

        Ok(Self(user))
    }
}

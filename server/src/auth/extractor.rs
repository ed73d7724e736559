use crate::db::DbPool;
use crate::models::User;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::Response,
};
use std::sync::Arc;

use super::db::user_for_token;
use super::middleware::{bearer_token, unauthorized};

/// Extractor giving handlers the authenticated [`User`] behind the bearer
/// token. The `require_auth` middleware has usually already vetted the
/// token by the time this runs; the extractor re-resolves it so handlers
/// that need the user (owner checks, `created_by` columns) get the row
/// without a second query of their own.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<DbPool>: FromRef<S>,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).map_err(unauthorized)?;

        let pool = Arc::<DbPool>::from_ref(state);
        match user_for_token(&pool, token).await {
            Some(user) => Ok(AuthUser(user)),
            None => Err(unauthorized("Invalid or expired token")),
        }
    }
}

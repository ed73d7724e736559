use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::crypto::{generate_token, hash_token};

/// Well-known token for the dev user "t", so a local session survives
/// database resets.
pub const DEV_TEST_TOKEN: &str = "tttttttttttttttttttttttttttttttttttttttttttttttttttttttttttttttt";

const SESSION_TTL_DAYS: i64 = 30;

/// Open a session for `user_id` and return the plaintext token. Only the
/// SHA-256 of the token is stored; `fixed_token` overrides generation for
/// the dev user.
pub fn open_session(
    conn: &mut PgConnection,
    user_id: Uuid,
    fixed_token: Option<&str>,
) -> Result<String, diesel::result::Error> {
    let token = match fixed_token {
        Some(t) => t.to_string(),
        None => generate_token(),
    };

    diesel::insert_into(sessions::table)
        .values(&NewSession {
            user_id,
            token_hash: &hash_token(&token),
            expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
        })
        .execute(conn)?;

    Ok(token)
}

/// Resolve a bearer token to its live, non-deleted user. `None` covers
/// every failure mode: unknown token, expired session, deleted user, or a
/// pool/database error.
pub async fn user_for_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;

    sessions::table
        .filter(sessions::token_hash.eq(hash_token(token)))
        .filter(sessions::expires_at.gt(Utc::now()))
        .inner_join(users::table)
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .get_result(&mut conn)
        .ok()
}

//! Session-token auth: argon2 password hashes, SHA-256 hashed bearer
//! tokens, a router-level middleware gate, and a per-handler extractor.

mod crypto;
mod db;
mod extractor;
mod middleware;

pub use crypto::{hash_password, verify_password};
pub use db::{open_session, DEV_TEST_TOKEN};
pub use extractor::AuthUser;
pub use middleware::require_auth;

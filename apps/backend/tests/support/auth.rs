//! Token helpers for tests

use std::time::{Duration, SystemTime};

use todo_backend::auth::jwt::{encode_claims, mint_access_token, Claims};
use todo_backend::state::security_config::SecurityConfig;

/// Mint a token that is valid for the configured TTL from now.
pub fn mint_test_token(user_id: i64, email: &str, is_admin: bool, sec: &SecurityConfig) -> String {
    mint_access_token(user_id, email, is_admin, SystemTime::now(), sec)
        .expect("should mint token successfully")
}

/// Mint a token whose expiry is already in the past.
pub fn mint_expired_token(user_id: i64, email: &str, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now() - sec.token_ttl - Duration::from_secs(60);
    mint_access_token(user_id, email, false, issued, sec).expect("should mint token successfully")
}

/// Sign an arbitrary claim set.
pub fn sign_claims(claims: &Claims, sec: &SecurityConfig) -> String {
    encode_claims(claims, sec).expect("should sign claims")
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

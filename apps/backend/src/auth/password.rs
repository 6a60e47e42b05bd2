//! Argon2id password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

fn hasher(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

/// Hash a plaintext password into a PHC string with a fresh random salt.
pub fn hash_password(plaintext: &str, params: &Params) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher(params)
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Hash of a fixed throwaway password, used to spend the same verification
/// work on logins for unknown emails. Empty if hashing fails.
pub fn dummy_digest(params: &Params) -> String {
    hash_password("unknown-account-placeholder", params).unwrap_or_default()
}

/// Check a plaintext password against a stored PHC digest.
///
/// Cost parameters are read from the digest itself. An unparsable digest
/// counts as a mismatch.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(digest) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

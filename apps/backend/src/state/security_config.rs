use std::env;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use argon2::Params;
use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Default session lifetime: 7 days.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Longest session lifetime accepted from the environment: 365 days.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Signing and hashing settings shared by every request.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC secret for signing and verifying session tokens. May be empty;
    /// token operations then fail with a configuration error.
    pub jwt_secret: Vec<u8>,
    /// Pinned signing algorithm
    pub algorithm: Algorithm,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Argon2id cost parameters
    pub argon2_params: Params,
    /// Lazily built digest under `argon2_params`, verified against when a
    /// login names an unknown email. Shared by clones.
    pub dummy_digest: Arc<OnceLock<String>>,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given secret and default TTL/cost.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_TOKEN_TTL,
            argon2_params: Params::default(),
            dummy_digest: Arc::default(),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_argon2_params(mut self, params: Params) -> Self {
        self.argon2_params = params;
        self.dummy_digest = Arc::default();
        self
    }

    /// Load from `SESSION_SECRET` and `SESSION_TTL_SECS`.
    ///
    /// A missing secret is not an error here; it surfaces on the first
    /// token issue or verify.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var("SESSION_SECRET").unwrap_or_default();

        let ttl = match env::var("SESSION_TTL_SECS") {
            Ok(raw) if !raw.trim().is_empty() => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    AppError::config(format!(
                        "SESSION_TTL_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(AppError::config("SESSION_TTL_SECS must be greater than zero"));
                }
                if secs > MAX_TOKEN_TTL.as_secs() {
                    return Err(AppError::config(format!(
                        "SESSION_TTL_SECS must be at most {} seconds",
                        MAX_TOKEN_TTL.as_secs()
                    )));
                }
                Duration::from_secs(secs)
            }
            _ => DEFAULT_TOKEN_TTL,
        };

        Ok(Self::new(secret.into_bytes()).with_token_ttl(ttl))
    }

    /// Whether a usable signing secret is configured
    pub fn has_secret(&self) -> bool {
        !self.jwt_secret.is_empty()
    }

    /// Cheap hashing parameters and a fixed secret for tests.
    pub fn for_tests() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec()).with_argon2_params(params)
    }
}

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::state::security_config::SecurityConfig;

/// Claims carried by session tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub is_admin: bool,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret is not configured: {0}")]
    Configuration(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("token signature or algorithm does not match")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token: {0}")]
    Malformed(String),
    #[error("token does not carry a valid user id")]
    MissingSubject,
}

impl TokenError {
    /// Stable reason string for security logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Configuration(_) => "configuration",
            TokenError::Signing(_) => "signing",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::Malformed(_) => "malformed",
            TokenError::MissingSubject => "missing_subject",
        }
    }
}

/// Seconds since the Unix epoch; negative for instants before it.
fn unix_seconds(t: SystemTime) -> i64 {
    match t.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs() as i64,
        Err(e) => -(e.duration().as_secs() as i64),
    }
}

fn require_secret(security: &SecurityConfig) -> Result<&[u8], TokenError> {
    if security.has_secret() {
        Ok(&security.jwt_secret)
    } else {
        Err(TokenError::Configuration(
            "SESSION_SECRET is empty or not set".to_string(),
        ))
    }
}

/// Sign an explicit claim set.
pub fn encode_claims(claims: &Claims, security: &SecurityConfig) -> Result<String, TokenError> {
    let secret = require_secret(security)?;
    encode(
        &Header::new(security.algorithm),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Mint a session token for a user, expiring `security.token_ttl` after `now`.
pub fn mint_access_token(
    user_id: i64,
    email: &str,
    is_admin: bool,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, TokenError> {
    let ttl = i64::try_from(security.token_ttl.as_secs()).unwrap_or(i64::MAX);
    let exp = unix_seconds(now).saturating_add(ttl);
    let claims = Claims {
        user_id,
        email: email.to_string(),
        is_admin,
        exp,
    };
    encode_claims(&claims, security)
}

/// Verify a session token and return its claims.
///
/// The header must name the configured algorithm exactly; anything else,
/// including `none`, is treated as a signature failure. A token is expired
/// once `now >= exp`.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let secret = require_secret(security)?;

    let declared = declared_algorithm(token)?;
    match declared.parse::<Algorithm>() {
        Ok(alg) if alg == security.algorithm => {}
        _ => return Err(TokenError::InvalidSignature),
    }

    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;
    validation.validate_exp = false;
    validation.required_spec_claims = HashSet::new();

    let raw = decode::<Value>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(e.to_string()),
        })?;

    claims_from_value(raw, unix_seconds(now))
}

fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let segment = token
        .split('.')
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| TokenError::Malformed("missing header segment".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| TokenError::Malformed(format!("header is not base64url: {e}")))?;
    let header: Value = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("header is not JSON: {e}")))?;
    header
        .get("alg")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| TokenError::Malformed("header has no alg".to_string()))
}

/// Convert verified, untyped claims into [`Claims`].
///
/// `exp` is checked before the subject so a stale token reports `Expired`.
/// `is_admin` fails open to `false` when absent or not a boolean.
fn claims_from_value(raw: Value, now: i64) -> Result<Claims, TokenError> {
    let Value::Object(map) = raw else {
        return Err(TokenError::Malformed("claims are not a JSON object".to_string()));
    };

    let exp = map
        .get("exp")
        .and_then(numeric_seconds)
        .ok_or_else(|| TokenError::Malformed("exp is missing or not numeric".to_string()))?;
    if now >= exp {
        return Err(TokenError::Expired);
    }

    let user_id = map
        .get("user_id")
        .and_then(positive_id)
        .ok_or(TokenError::MissingSubject)?;

    let email = map
        .get("email")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let is_admin = map.get("is_admin").and_then(Value::as_bool).unwrap_or(false);

    Ok(Claims {
        user_id,
        email,
        is_admin,
        exp,
    })
}

fn numeric_seconds(v: &Value) -> Option<i64> {
    v.as_i64()
        .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Positive integer ids; floats are accepted only with a zero fraction.
fn positive_id(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return (i > 0).then_some(i);
    }
    let f = v.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f < i64::MAX as f64).then_some(f as i64)
}

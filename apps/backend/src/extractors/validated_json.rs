use std::ops::Deref;
use std::sync::LazyLock;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Error as JsonError;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Field-level rules checked after a request body deserializes.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// JSON body extractor that deserializes and then runs [`Validate`].
///
/// Parse and validation failures both become 400 `VALIDATION_ERROR`
/// problem responses. Bodies over [`MAX_BODY_BYTES`] are refused with 413
/// `PAYLOAD_TOO_LARGE` before they are parsed.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or("")
            .to_string();
        let declared_len = declared_content_length(req);

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            if declared_len.is_some_and(|len| len > MAX_BODY_BYTES) {
                return Err(body_too_large());
            }

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(body_too_large());
                }
                body.extend_from_slice(&chunk);
            }

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    trace_id = %trace_id,
                    error = %Redacted(&e.to_string()),
                    content_type = %content_type,
                    body_size = body.len(),
                    "JSON parsing failed"
                );
                AppError::invalid(ErrorCode::ValidationError, classify_json_error(&e))
            })?;

            parsed.validate()?;
            Ok(ValidatedJson(parsed))
        })
    }
}

fn declared_content_length(req: &HttpRequest) -> Option<usize> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok())
}

fn body_too_large() -> AppError {
    AppError::payload_too_large(format!(
        "Request body exceeds {MAX_BODY_BYTES} bytes"
    ))
}

/// Classify serde_json::Error and return a sanitized error message
fn classify_json_error(error: &JsonError) -> String {
    match error.classify() {
        serde_json::error::Category::Syntax => {
            format!("Invalid JSON at line {}", error.line())
        }
        serde_json::error::Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        serde_json::error::Category::Data => {
            "Invalid JSON: missing fields or wrong types".to_string()
        }
        serde_json::error::Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

/// Reusable field rules.
pub mod rules {
    use super::*;

    #[allow(clippy::unwrap_used)]
    static EMAIL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

    pub fn email(field: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("{field} is required"),
            ));
        }
        if !EMAIL.is_match(value) {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("{field} must be a valid email address"),
            ));
        }
        Ok(())
    }

    pub fn required(field: &str, value: &str) -> Result<(), AppError> {
        if value.is_empty() {
            Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("{field} is required"),
            ))
        } else {
            Ok(())
        }
    }

    pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), AppError> {
        if value.chars().count() > max {
            Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("{field} must be at most {max} characters"),
            ))
        } else {
            Ok(())
        }
    }

    pub fn min_chars(field: &str, value: &str, min: usize) -> Result<(), AppError> {
        if value.chars().count() < min {
            Err(AppError::invalid(
                ErrorCode::ValidationError,
                format!("{field} must be at least {min} characters"),
            ))
        } else {
            Ok(())
        }
    }
}

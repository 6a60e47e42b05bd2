use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Positive integer `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl PathId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(PathId(id)),
            _ => Err(AppError::bad_request(
                ErrorCode::InvalidId,
                format!("Invalid id: {raw}"),
            )),
        }
    }
}

impl FromRequest for PathId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(match req.match_info().get("id") {
            Some(raw) => PathId::parse(raw),
            None => Err(AppError::bad_request(
                ErrorCode::InvalidId,
                "Missing id parameter",
            )),
        })
    }
}

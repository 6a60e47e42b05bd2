//! Request identity gate.
//!
//! Validates the `Authorization: Bearer <token>` header and stores the
//! resulting [`RequestIdentity`] in request extensions. Requests that fail
//! never reach the wrapped service.

use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::identity::RequestIdentity;
use crate::auth::jwt::verify_access_token;
use crate::error::{unauthorized, AppError};
use crate::logging::security as security_log;
use crate::state::app_state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(identity) => {
                req.extensions_mut().insert(identity);
                Box::pin(self.service.call(req))
            }
            Err(err) => Box::pin(async move { Err(err.into()) }),
        }
    }
}

fn authenticate(req: &ServiceRequest) -> Result<RequestIdentity, AppError> {
    let path = req.path();

    let token = match extract_bearer_from_header(req.headers().get(header::AUTHORIZATION)) {
        Ok(token) => token,
        Err((reason, err)) => {
            security_log::token_rejected(reason, path);
            return Err(err);
        }
    };

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    match verify_access_token(token, SystemTime::now(), &app_state.security) {
        Ok(claims) => Ok(RequestIdentity::from(&claims)),
        Err(e) => {
            security_log::token_rejected(e.reason(), path);
            Err(e.into())
        }
    }
}

/// Pull the token out of the header value.
///
/// The error carries an internal reason for logging plus the client-facing error.
fn extract_bearer_from_header(
    header_value: Option<&HeaderValue>,
) -> Result<&str, (&'static str, AppError)> {
    let Some(value) = header_value else {
        return Err((
            "missing_header",
            AppError::unauthorized(unauthorized::HEADER_REQUIRED),
        ));
    };

    value
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or((
            "missing_bearer_prefix",
            AppError::unauthorized(unauthorized::BEARER_REQUIRED),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_of(result: Result<&str, (&'static str, AppError)>) -> (&'static str, String) {
        match result {
            Err((reason, err)) => (reason, err.detail()),
            Ok(token) => panic!("expected rejection, got token {token}"),
        }
    }

    #[test]
    fn test_missing_header() {
        let (reason, detail) = detail_of(extract_bearer_from_header(None));
        assert_eq!(reason, "missing_header");
        assert_eq!(detail, unauthorized::HEADER_REQUIRED);
    }

    #[test]
    fn test_non_bearer_schemes_rejected() {
        for raw in ["Basic dXNlcjpwYXNz", "bearer abc", "Bearerabc", "Token abc"] {
            let value = HeaderValue::from_static(raw);
            let (reason, detail) = detail_of(extract_bearer_from_header(Some(&value)));
            assert_eq!(reason, "missing_bearer_prefix", "{raw}");
            assert_eq!(detail, unauthorized::BEARER_REQUIRED);
        }
    }

    #[test]
    fn test_bearer_token_extracted() {
        let value = HeaderValue::from_static("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_from_header(Some(&value)).ok(), Some("abc.def.ghi"));
    }
}

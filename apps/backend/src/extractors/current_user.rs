use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::identity::RequestIdentity;
use crate::error::{unauthorized, AppError};

/// The authenticated caller, as verified by the `JwtExtract` middleware.
///
/// Handlers take this instead of reading headers. On a route that is not
/// wrapped by the identity gate the extractor fails with 401. Role checks
/// happen in `AdminGate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<RequestIdentity>().copied();
        ready(
            identity
                .map(|identity| CurrentUser {
                    id: identity.user_id,
                })
                .ok_or_else(|| AppError::unauthorized(unauthorized::HEADER_REQUIRED)),
        )
    }
}

//! Role gate for administrator-only routes.
//!
//! Must be wrapped inside `JwtExtract` so the identity is already present:
//!
//! web::scope("/admin")
//!     .wrap(AdminGate)
//!     .wrap(JwtExtract) // outermost, runs first

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::identity::RequestIdentity;
use crate::error::AppError;
use crate::logging::security as security_log;

pub struct AdminGate;

impl<S, B> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateMiddleware { service }))
    }
}

pub struct AdminGateMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AdminGateMiddleware<S>
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
        let identity = req.extensions().get::<RequestIdentity>().copied();

        match identity {
            Some(RequestIdentity { is_admin: true, .. }) => Box::pin(self.service.call(req)),
            other => {
                security_log::admin_denied(other.map(|i| i.user_id), req.path());
                Box::pin(async { Err(AppError::forbidden().into()) })
            }
        }
    }
}

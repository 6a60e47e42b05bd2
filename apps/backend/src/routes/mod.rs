use actix_web::web;

use crate::middleware::{AdminGate, JwtExtract};

pub mod admin;
pub mod auth;
pub mod health;
pub mod me;
pub mod todos;
pub mod views;

/// Register every route with its gate.
///
/// `/health` and `/api/auth/**` are public. Everything else under `/api`
/// sits behind `JwtExtract`, and `/api/admin/**` additionally behind
/// `AdminGate`. App-wide middleware (tracing, CORS, security headers) is
/// wired by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/api")
            // Auth routes: /api/auth/**
            .service(web::scope("/auth").configure(auth::configure_routes))
            // Admin routes: /api/admin/**
            .service(
                web::scope("/admin")
                    .wrap(AdminGate)
                    .wrap(JwtExtract)
                    .configure(admin::configure_routes),
            )
            // Todo routes: /api/todos/**
            .service(
                web::scope("/todos")
                    .wrap(JwtExtract)
                    .configure(todos::configure_routes),
            )
            .service(
                web::resource("/me")
                    .wrap(JwtExtract)
                    .route(web::get().to(me::me)),
            ),
    );
}

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::validated_json::{rules, Validate, ValidatedJson};
use crate::routes::views::UserView;
use crate::services::users::{self as users_service, Session};
use crate::state::app_state::AppState;

/// Upper bound on password length; Argon2 work grows with input size.
const MAX_PASSWORD_CHARS: usize = 1024;

#[derive(Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), AppError> {
        rules::email("email", &self.email)?;
        rules::min_chars("password", &self.password, 6)?;
        rules::max_chars("password", &self.password, MAX_PASSWORD_CHARS)
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), AppError> {
        rules::email("email", &self.email)?;
        rules::required("password", &self.password)?;
        rules::max_chars("password", &self.password, MAX_PASSWORD_CHARS)
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    message: &'static str,
    token: String,
    user: UserView,
}

impl AuthResponse {
    fn new(message: &'static str, session: Session) -> Self {
        Self {
            message,
            token: session.token,
            user: session.user.into(),
        }
    }
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let session =
        users_service::register(db, &app_state.security, &body.email, &body.password).await?;

    Ok(HttpResponse::Created().json(AuthResponse::new("User registered successfully", session)))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let session =
        users_service::login(db, &app_state.security, &body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse::new("Login successful", session)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/login").route(web::post().to(login)));
}

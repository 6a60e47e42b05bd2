//! Administrator user management. Mounted behind `JwtExtract` and `AdminGate`.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::validated_json::{Validate, ValidatedJson};
use crate::extractors::{CurrentUser, PathId};
use crate::routes::views::{MessageResponse, UserView};
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct SetAdminRequest {
    is_admin: bool,
}

impl Validate for SetAdminRequest {
    fn validate(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Serialize)]
struct UserResponse {
    user: UserView,
}

#[derive(Serialize)]
struct UserListResponse {
    users: Vec<UserView>,
}

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let users = users_service::list_users(db).await?;

    Ok(HttpResponse::Ok().json(UserListResponse {
        users: users.into_iter().map(UserView::from).collect(),
    }))
}

async fn get_user(
    user_id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = users_service::get_user(db, user_id.0).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

async fn delete_user(
    current_user: CurrentUser,
    user_id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    if !users_service::delete_user(db, current_user.id, user_id.0).await? {
        return Err(AppError::not_found(ErrorCode::UserNotFound, "User not found"));
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "User deleted successfully",
    }))
}

async fn set_admin(
    current_user: CurrentUser,
    user_id: PathId,
    body: ValidatedJson<SetAdminRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user =
        users_service::set_admin(db, current_user.id, user_id.0, body.is_admin).await?;

    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users").route(web::get().to(list_users)))
        .service(
            web::resource("/users/{id}")
                .route(web::get().to(get_user))
                .route(web::delete().to(delete_user))
                .route(web::patch().to(set_admin)),
        );
}

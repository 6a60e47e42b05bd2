use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::routes::views::UserView;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

#[derive(Serialize)]
struct MeResponse {
    user: UserView,
}

/// GET /api/me
///
/// 404 when the token is still valid but the account has since been deleted.
pub async fn me(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let user = users_service::get_user(db, current_user.id).await?;

    Ok(HttpResponse::Ok().json(MeResponse { user: user.into() }))
}

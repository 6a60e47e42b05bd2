use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::validated_json::{rules, Validate, ValidatedJson};
use crate::extractors::{CurrentUser, PathId};
use crate::repos::todos::TodoUpdate;
use crate::routes::views::{MessageResponse, TodoView};
use crate::services::todos as todos_service;
use crate::state::app_state::AppState;

#[derive(Deserialize)]
pub struct CreateTodoRequest {
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl Validate for CreateTodoRequest {
    fn validate(&self) -> Result<(), AppError> {
        rules::required("title", &self.title)
    }
}

/// Partial update. Absent and `null` fields are left unchanged; an empty
/// string is a real value.
#[derive(Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: Option<bool>,
}

impl Validate for UpdateTodoRequest {
    fn validate(&self) -> Result<(), AppError> {
        if matches!(self.title.as_deref(), Some("")) {
            return Err(AppError::invalid(
                ErrorCode::ValidationError,
                "title cannot be empty",
            ));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct TodoResponse {
    todo: TodoView,
}

#[derive(Serialize)]
struct TodoListResponse {
    todos: Vec<TodoView>,
}

async fn list_todos(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let todos = todos_service::list(db, current_user.id).await?;

    Ok(HttpResponse::Ok().json(TodoListResponse {
        todos: todos.into_iter().map(TodoView::from).collect(),
    }))
}

async fn create_todo(
    current_user: CurrentUser,
    body: ValidatedJson<CreateTodoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();
    let todo = todos_service::create(
        db,
        current_user.id,
        &body.title,
        body.description.as_deref().unwrap_or_default(),
    )
    .await?;

    Ok(HttpResponse::Created().json(TodoResponse { todo: todo.into() }))
}

async fn get_todo(
    current_user: CurrentUser,
    todo_id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let todo = todos_service::get(db, current_user.id, todo_id.0).await?;

    Ok(HttpResponse::Ok().json(TodoResponse { todo: todo.into() }))
}

async fn update_todo(
    current_user: CurrentUser,
    todo_id: PathId,
    body: ValidatedJson<UpdateTodoRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let body = body.into_inner();
    let update = TodoUpdate {
        title: body.title,
        description: body.description,
        completed: body.completed,
    };
    let todo = todos_service::update(db, current_user.id, todo_id.0, update).await?;

    Ok(HttpResponse::Ok().json(TodoResponse { todo: todo.into() }))
}

async fn delete_todo(
    current_user: CurrentUser,
    todo_id: PathId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    todos_service::delete(db, current_user.id, todo_id.0).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Todo deleted successfully",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_todos))
            .route(web::post().to(create_todo)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_todo))
            .route(web::put().to(update_todo))
            .route(web::delete().to(delete_todo)),
    );
}

//! Owner-scoped todo operations.

use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::todos::{self as todos_repo, Todo, TodoUpdate};

fn todo_not_found() -> AppError {
    AppError::not_found(ErrorCode::TodoNotFound, "Todo not found")
}

/// The caller's todos, newest first.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Todo>, AppError> {
    Ok(todos_repo::list_for_user(conn, user_id).await?)
}

pub async fn get<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<Todo, AppError> {
    todos_repo::find_for_user(conn, user_id, todo_id)
        .await?
        .ok_or_else(todo_not_found)
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<Todo, AppError> {
    Ok(todos_repo::create(conn, user_id, title, description).await?)
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
    update: TodoUpdate,
) -> Result<Todo, AppError> {
    todos_repo::update_for_user(conn, user_id, todo_id, update)
        .await?
        .ok_or_else(todo_not_found)
}

pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<(), AppError> {
    if todos_repo::delete_for_user(conn, user_id, todo_id).await? {
        Ok(())
    } else {
        Err(todo_not_found())
    }
}

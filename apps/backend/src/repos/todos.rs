//! Todo repository functions for domain layer (generic over ConnectionTrait).
//!
//! Every function takes the owner id; a todo belonging to someone else is
//! indistinguishable from one that does not exist.

use sea_orm::ConnectionTrait;

use crate::adapters::todos_sea as todos_adapter;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::db_op;

pub use todos_adapter::TodoUpdate;

/// Todo domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Todo>, DomainError> {
    let todos = todos_adapter::list_for_user(conn, user_id)
        .await
        .map_err(db_op("failed to list todos"))?;
    Ok(todos.into_iter().map(Todo::from).collect())
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<Option<Todo>, DomainError> {
    let todo = todos_adapter::find_for_user(conn, user_id, todo_id)
        .await
        .map_err(db_op("failed to find todo"))?;
    Ok(todo.map(Todo::from))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    title: &str,
    description: &str,
) -> Result<Todo, DomainError> {
    let dto = todos_adapter::TodoCreate {
        user_id,
        title: title.to_string(),
        description: description.to_string(),
    };
    let todo = todos_adapter::create(conn, dto)
        .await
        .map_err(db_op("failed to create todo"))?;
    Ok(Todo::from(todo))
}

pub async fn update_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
    update: TodoUpdate,
) -> Result<Option<Todo>, DomainError> {
    let todo = todos_adapter::update_for_user(conn, user_id, todo_id, update)
        .await
        .map_err(db_op("failed to update todo"))?;
    Ok(todo.map(Todo::from))
}

pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<bool, DomainError> {
    todos_adapter::soft_delete_for_user(conn, user_id, todo_id)
        .await
        .map_err(db_op("failed to delete todo"))
}

/// Cascade step of user deletion.
pub async fn delete_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    todos_adapter::soft_delete_all_for_user(conn, user_id)
        .await
        .map_err(db_op("failed to delete user's todos"))
}

impl From<crate::entities::todos::Model> for Todo {
    fn from(model: crate::entities::todos::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

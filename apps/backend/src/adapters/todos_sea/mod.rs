//! SeaORM adapter for todo repository.
//!
//! Every query is scoped to the owning user and ignores soft-deleted rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Select, Set,
};

use crate::entities::todos;

pub mod dto;

pub use dto::{TodoCreate, TodoUpdate};

fn owned_by(user_id: i64) -> Select<todos::Entity> {
    todos::Entity::find()
        .filter(todos::Column::UserId.eq(user_id))
        .filter(todos::Column::DeletedAt.is_null())
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<todos::Model>, sea_orm::DbErr> {
    owned_by(user_id)
        .order_by_desc(todos::Column::CreatedAt)
        .order_by_desc(todos::Column::Id)
        .all(conn)
        .await
}

pub async fn find_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    owned_by(user_id)
        .filter(todos::Column::Id.eq(todo_id))
        .one(conn)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: TodoCreate,
) -> Result<todos::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let todo_active = todos::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        description: Set(dto.description),
        completed: Set(false),
        user_id: Set(dto.user_id),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };

    todo_active.insert(conn).await
}

/// Apply a partial update to a todo owned by `user_id`.
/// Returns `None` if the caller does not own a live todo with that id.
pub async fn update_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
    dto: TodoUpdate,
) -> Result<Option<todos::Model>, sea_orm::DbErr> {
    let Some(existing) = find_for_user(conn, user_id, todo_id).await? else {
        return Ok(None);
    };

    let mut active: todos::ActiveModel = existing.into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(description) = dto.description {
        active.description = Set(description);
    }
    if let Some(completed) = dto.completed {
        active.completed = Set(completed);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

pub async fn soft_delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    todo_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = todos::Entity::update_many()
        .col_expr(todos::Column::DeletedAt, Expr::value(now))
        .col_expr(todos::Column::UpdatedAt, Expr::value(now))
        .filter(todos::Column::Id.eq(todo_id))
        .filter(todos::Column::UserId.eq(user_id))
        .filter(todos::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Soft-delete every live todo owned by `user_id`. Returns the number stamped.
pub async fn soft_delete_all_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = todos::Entity::update_many()
        .col_expr(todos::Column::DeletedAt, Expr::value(now))
        .col_expr(todos::Column::UpdatedAt, Expr::value(now))
        .filter(todos::Column::UserId.eq(user_id))
        .filter(todos::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

//! SeaORM adapter for user repository.
//!
//! Every read ignores soft-deleted rows.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserCreate;

fn live() -> Select<users::Entity> {
    users::Entity::find().filter(users::Column::DeletedAt.is_null())
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    live()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    live().filter(users::Column::Id.eq(user_id)).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    live().order_by_asc(users::Column::Id).all(conn).await
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    live().count(conn).await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        is_admin: Set(dto.is_admin),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    };

    user_active.insert(conn).await
}

/// Overwrite the admin flag of a live user. Returns `None` if no live row matched.
pub async fn set_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    is_admin: bool,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, user_id).await? else {
        return Ok(None);
    };

    let mut active: users::ActiveModel = existing.into();
    active.is_admin = Set(is_admin);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await.map(Some)
}

/// Stamp `deleted_at` on a live user. Returns whether a row was stamped.
pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = users::Entity::update_many()
        .col_expr(users::Column::DeletedAt, Expr::value(now))
        .col_expr(users::Column::UpdatedAt, Expr::value(now))
        .filter(users::Column::Id.eq(user_id))
        .filter(users::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}

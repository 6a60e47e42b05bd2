//! User repository functions for domain layer (generic over ConnectionTrait).
//!
//! This is the credential store: lookups, creation, live-row count, admin
//! flag updates and soft deletion. Failures are translated into
//! `DomainError` tagged with the operation that produced them.

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::db_op;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email)
        .await
        .map_err(db_op("failed to find user by email"))?;
    Ok(user.map(User::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id)
        .await
        .map_err(db_op("failed to find user by id"))?;
    Ok(user.map(User::from))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list(conn)
        .await
        .map_err(db_op("failed to list users"))?;
    Ok(users.into_iter().map(User::from).collect())
}

/// Number of live (not soft-deleted) users.
pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    users_adapter::count(conn)
        .await
        .map_err(db_op("failed to count users"))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password_hash: &str,
    is_admin: bool,
) -> Result<User, DomainError> {
    let dto = users_adapter::UserCreate::new(email, password_hash).with_admin(is_admin);
    let user = users_adapter::create(conn, dto)
        .await
        .map_err(db_op("failed to create user"))?;
    Ok(User::from(user))
}

pub async fn set_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    is_admin: bool,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::set_admin(conn, user_id, is_admin)
        .await
        .map_err(db_op("failed to update user"))?;
    Ok(user.map(User::from))
}

/// Soft-delete a user. Returns whether a live row was removed.
pub async fn delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<bool, DomainError> {
    users_adapter::soft_delete(conn, user_id)
        .await
        .map_err(db_op("failed to delete user"))
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

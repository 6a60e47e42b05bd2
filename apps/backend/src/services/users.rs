//! Credential service: registration, login and administrative user
//! management.

use std::sync::Arc;
use std::time::SystemTime;

use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::{debug, info};

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{dummy_digest, hash_password, verify_password};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::errors::ErrorCode;
use crate::infra::db_errors::db_op;
use crate::logging::security as security_log;
use crate::repos::todos as todos_repo;
use crate::repos::users::{self as users_repo, User};
use crate::state::security_config::SecurityConfig;

/// A user together with a freshly minted session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: String,
}

fn issue_session(user: User, security: &SecurityConfig) -> Result<Session, AppError> {
    let token = mint_access_token(
        user.id,
        &user.email,
        user.is_admin,
        SystemTime::now(),
        security,
    )?;
    Ok(Session { user, token })
}

fn email_taken() -> AppError {
    AppError::conflict(ErrorCode::EmailTaken, "Email already registered")
}

fn user_not_found() -> AppError {
    AppError::not_found(ErrorCode::UserNotFound, "User not found")
}

/// Register a new account and issue its first token.
///
/// The very first account in an empty store becomes an administrator. The
/// count and the insert are separate statements, so two concurrent first
/// registrations may both be promoted.
pub async fn register<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    if users_repo::find_by_email(conn, email).await?.is_some() {
        security_log::registration_rejected("email_taken", email);
        return Err(email_taken());
    }

    let password_hash = {
        let password = password.to_owned();
        let params = security.argon2_params.clone();
        tokio::task::spawn_blocking(move || hash_password(&password, &params))
            .await
            .map_err(|e| AppError::internal(format!("password hashing task failed: {e}")))??
    };

    let is_first = users_repo::count(conn).await? == 0;

    let user = match users_repo::create(conn, email, &password_hash, is_first).await {
        Ok(user) => user,
        Err(DomainError::Conflict(ConflictKind::UniqueEmail, _)) => {
            security_log::registration_rejected("email_taken_race", email);
            return Err(email_taken());
        }
        Err(e) => return Err(e.into()),
    };

    if is_first {
        info!(user_id = user.id, "First registered user promoted to administrator");
    } else {
        debug!(user_id = user.id, "User registered");
    }

    issue_session(user, security)
}

/// Check credentials and issue a token.
///
/// Unknown email and wrong password produce the same error.
pub async fn login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    security: &SecurityConfig,
    email: &str,
    password: &str,
) -> Result<Session, AppError> {
    let Some(user) = users_repo::find_by_email(conn, email).await? else {
        password_matches(security, password, None).await?;
        security_log::login_failed("unknown_email", email);
        return Err(AppError::invalid_credentials());
    };

    if !password_matches(security, password, Some(user.password_hash.clone())).await? {
        security_log::login_failed("password_mismatch", email);
        return Err(AppError::invalid_credentials());
    }

    debug!(user_id = user.id, "User logged in");
    issue_session(user, security)
}

/// Verify `password` off the async runtime. With no stored digest the
/// dummy digest is verified instead and the result is always `false`.
async fn password_matches(
    security: &SecurityConfig,
    password: &str,
    digest: Option<String>,
) -> Result<bool, AppError> {
    let password = password.to_owned();
    let dummy = Arc::clone(&security.dummy_digest);
    let params = security.argon2_params.clone();
    tokio::task::spawn_blocking(move || match digest {
        Some(digest) => verify_password(&password, &digest),
        None => {
            let dummy = dummy.get_or_init(|| dummy_digest(&params));
            verify_password(&password, dummy);
            false
        }
    })
    .await
    .map_err(|e| AppError::internal(format!("password verification task failed: {e}")))
}

pub async fn get_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, AppError> {
    users_repo::find_by_id(conn, user_id)
        .await?
        .ok_or_else(user_not_found)
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, AppError> {
    Ok(users_repo::list(conn).await?)
}

/// Delete `target_id` on behalf of `actor_id`, cascading to the target's
/// todos. Returns whether a user row was actually removed.
pub async fn delete_user<C: ConnectionTrait + TransactionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    target_id: i64,
) -> Result<bool, AppError> {
    if actor_id == target_id {
        security_log::self_deletion_blocked(actor_id);
        return Err(AppError::self_deletion());
    }

    let txn = conn
        .begin()
        .await
        .map_err(db_op("failed to begin user deletion"))?;

    if users_repo::find_by_id(&txn, target_id).await?.is_none() {
        return Err(user_not_found());
    }

    let todos_removed = todos_repo::delete_all_for_user(&txn, target_id).await?;
    let removed = users_repo::delete(&txn, target_id).await?;

    txn.commit()
        .await
        .map_err(db_op("failed to commit user deletion"))?;

    info!(
        actor_id,
        target_id, todos_removed, removed, "User deleted by administrator"
    );
    Ok(removed)
}

/// Overwrite the administrator flag of `target_id`.
///
/// An administrator may revoke their own flag.
pub async fn set_admin<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    target_id: i64,
    is_admin: bool,
) -> Result<User, AppError> {
    let user = users_repo::set_admin(conn, target_id, is_admin)
        .await?
        .ok_or_else(user_not_found)?;

    info!(actor_id, target_id, is_admin, "Administrator flag updated");
    Ok(user)
}

use std::env;

use crate::error::AppError;

/// Resolve the database URL from the environment.
///
/// `DATABASE_URL` wins when set (any backend sea-orm understands, e.g.
/// `sqlite::memory:` for local runs). Otherwise a Postgres URL is assembled
/// from the `POSTGRES_*` variables.
pub fn db_url() -> Result<String, AppError> {
    if let Some(url) = non_empty_var("DATABASE_URL") {
        return Ok(url);
    }

    let host = non_empty_var("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = non_empty_var("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
    let db_name = must_var("POSTGRES_DB")?;
    let username = must_var("POSTGRES_USER")?;
    let password = must_var("POSTGRES_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    non_empty_var(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}

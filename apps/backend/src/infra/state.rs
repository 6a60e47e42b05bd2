use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for `AppState`, shared by `main` and the integration tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_url: Option<String>,
}

impl StateBuilder {
    pub fn new(security_config: SecurityConfig) -> Self {
        Self {
            security_config,
            db_url: None,
        }
    }

    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_url {
            // single entrypoint: connect + migrate
            Some(url) => {
                let conn = bootstrap_db(&url).await?;
                Ok(AppState::new(conn, self.security_config))
            }
            None => Ok(AppState::without_db(self.security_config)),
        }
    }
}

pub fn build_state(security_config: SecurityConfig) -> StateBuilder {
    StateBuilder::new(security_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_without_db_url_has_no_connection() {
        let state = build_state(SecurityConfig::for_tests())
            .build()
            .await
            .unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn build_with_sqlite_url_connects_and_migrates() {
        let state = build_state(SecurityConfig::for_tests())
            .with_db_url("sqlite::memory:")
            .build()
            .await
            .unwrap();
        assert!(state.db().is_some());
    }
}

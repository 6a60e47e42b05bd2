use todo_backend::infra::state::build_state;
use todo_backend::state::app_state::AppState;
use todo_backend::state::security_config::SecurityConfig;

/// Fresh in-memory SQLite store with migrations applied.
pub async fn build_test_state() -> AppState {
    build_test_state_with(SecurityConfig::for_tests()).await
}

pub async fn build_test_state_with(security: SecurityConfig) -> AppState {
    build_state(security)
        .with_db_url("sqlite::memory:")
        .build()
        .await
        .expect("in-memory test state should build")
}

//! DTOs for todos_sea adapter.

/// DTO for creating a new todo.
#[derive(Debug, Clone)]
pub struct TodoCreate {
    pub user_id: i64,
    pub title: String,
    pub description: String,
}

/// DTO for a partial todo update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

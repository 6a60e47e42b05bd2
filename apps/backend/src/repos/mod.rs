//! Repository functions for the domain layer.

pub mod todos;
pub mod users;

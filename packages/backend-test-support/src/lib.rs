//! Backend test support utilities
//!
//! Shared helpers for the backend's integration tests: unified logging
//! initialization and assertions over the Problem Details error contract.

pub mod logging;
pub mod problem_details;

pub use problem_details::{assert_problem_details, read_problem_details, ProblemDetailsLike};

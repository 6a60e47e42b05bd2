//! Error codes for the backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing, garbled, invalid or expired bearer token
    Unauthorized,
    /// Email/password combination rejected
    InvalidCredentials,
    /// Authenticated but lacking the administrator flag
    Forbidden,
    /// Administrator attempted to delete their own account
    SelfDeletion,

    // Request Validation
    /// General validation error
    ValidationError,
    /// Malformed request body
    BadRequest,
    /// Path id is not a positive integer
    InvalidId,
    /// Request body exceeds the size limit
    PayloadTooLarge,

    // Resource Not Found
    /// User not found
    UserNotFound,
    /// Todo not found (or not owned by the caller)
    TodoNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Registration with an email that already exists
    EmailTaken,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Configuration error (e.g. missing signing secret)
    ConfigError,
    /// Internal server error
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::SelfDeletion => "SELF_DELETION",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

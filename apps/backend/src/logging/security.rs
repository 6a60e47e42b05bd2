//! Security event logging.
//!
//! Every event is a `warn!` carrying a stable `event` name and the current
//! trace id. Emails go through [`Redacted`]; tokens and passwords are never
//! passed in.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a security-relevant login failure event.
pub fn login_failed(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Authentication failure"
    );
}

/// Log a registration rejected by the store or validation.
pub fn registration_rejected(reason: &str, email: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_REGISTRATION_REJECTED",
        %trace_id,
        email = %Redacted(email),
        reason,
        "Registration rejected"
    );
}

/// Log a request turned away by the identity gate.
///
/// `reason` is internal detail (e.g. `expired`, `invalid_signature`) that
/// the client never sees.
pub fn token_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_TOKEN_REJECTED",
        %trace_id,
        reason,
        path,
        "Bearer token rejected"
    );
}

/// Log a non-admin identity reaching an admin route.
pub fn admin_denied(user_id: Option<i64>, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_ADMIN_DENIED",
        %trace_id,
        user_id,
        path,
        "Admin access denied"
    );
}

/// Log an administrator attempting to delete their own account.
pub fn self_deletion_blocked(user_id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SELF_DELETION_BLOCKED",
        %trace_id,
        user_id,
        "Self-deletion blocked"
    );
}

/// Verified identity attached to a request by the `JwtExtract` middleware.
///
/// Lives in request extensions for the duration of one request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestIdentity {
    pub user_id: i64,
    pub is_admin: bool,
}

impl From<&crate::auth::jwt::Claims> for RequestIdentity {
    fn from(claims: &crate::auth::jwt::Claims) -> Self {
        Self {
            user_id: claims.user_id,
            is_admin: claims.is_admin,
        }
    }
}

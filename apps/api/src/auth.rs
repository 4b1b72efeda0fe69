//! Request identity. The upstream gateway authenticates against Clerk and
//! injects the external user id as a header; this API trusts it as-is and
//! maps it to the internal user row.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::UserRow;

pub const CLERK_USER_HEADER: &str = "x-clerk-user-id";

/// Authenticated Clerk identity for the current request.
///
/// Extraction fails with `Unauthorized` when the header is absent or empty.
/// Use `Option<AuthUser>` in handlers that serve anonymous callers too.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub clerk_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let clerk_id = parts
            .headers
            .get(CLERK_USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(AuthUser {
            clerk_id: clerk_id.to_string(),
        })
    }
}

/// Resolves the internal user row for a Clerk id.
/// The row is created by the Clerk webhook; a missing row means the webhook
/// has not fired yet for this identity.
pub async fn current_user(pool: &PgPool, clerk_id: &str) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE clerk_id = $1")
        .bind(clerk_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

//! Authenticated session context.
//!
//! The auth middleware validates the bearer token and stores a [`Session`]
//! in request extensions; handlers receive it through the extractor below.
//! The session carries the email and role straight from the token claims,
//! so per-request authorization starts without a user lookup. Membership
//! checks still hit the database, because membership is project-scoped and
//! not part of the session.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use sprintboard_shared::auth::jwt::Claims;
use sprintboard_shared::models::membership::ProjectMember;
use sprintboard_shared::models::role::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;

/// The authenticated caller of the current request
#[derive(Debug, Clone)]
pub struct Session {
    /// User ID
    pub user_id: Uuid,

    /// User's email address
    pub email: String,

    /// User's account role
    pub role: Role,
}

impl Session {
    /// Builds a session from validated token claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }

    /// Requires the caller to be a member of the project
    ///
    /// Returns the caller's project-scoped role, or `Forbidden` when no
    /// membership row exists.
    pub async fn require_member(&self, pool: &PgPool, project_id: Uuid) -> Result<Role, ApiError> {
        ProjectMember::get_role(pool, project_id, self.user_id)
            .await?
            .ok_or_else(|| ApiError::Forbidden("Not a member of this project".to_string()))
    }

    /// Requires the caller's project role to pass `can_manage_project`
    pub async fn require_manager(&self, pool: &PgPool, project_id: Uuid) -> Result<Role, ApiError> {
        let role = self.require_member(pool, project_id).await?;
        if !role.can_manage_project() {
            return Err(ApiError::Forbidden(
                "Requires a project admin or manager role".to_string(),
            ));
        }
        Ok(role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Missing session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_shared::auth::jwt::TokenType;

    #[test]
    fn test_session_from_claims() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            Role::Manager,
            TokenType::Access,
        );

        let session = Session::from_claims(claims.clone());
        assert_eq!(session.user_id, claims.sub);
        assert_eq!(session.email, "user@example.com");
        assert_eq!(session.role, Role::Manager);
    }
}

//! Project membership model.
//!
//! Links a user to a project with a role scoped to that project. The table
//! keys on the real `(project_id, user_id)` pair, so at most one membership
//! can exist per user per project and the seed routine can upsert against
//! the constraint instead of a derived key.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE project_members (
//!     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     role project_role NOT NULL DEFAULT 'member',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     PRIMARY KEY (project_id, user_id)
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::role::Role;

/// Membership row binding a user to a project with a role
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within this project
    pub role: Role,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a membership
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMembership {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign
    #[serde(default)]
    pub role: Role,
}

/// Membership joined with the member's account fields, for listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberProfile {
    /// User ID
    pub user_id: Uuid,

    /// Member's email address
    pub email: String,

    /// Member's display name
    pub name: String,

    /// Role within the project
    pub role: Role,

    /// When the membership was created
    pub created_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Creates a new membership (adds a user to a project)
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate (project, user) pair or a missing
    /// project/user (constraint violations).
    pub async fn create(pool: &PgPool, data: CreateMembership) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING project_id, user_id, role, created_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(membership)
    }

    /// Finds a specific membership by project and user
    pub async fn find(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, role, created_at
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Gets a user's role within a project, if they are a member
    pub async fn get_role(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Role>, sqlx::Error> {
        let role: Option<Role> = sqlx::query_scalar(
            "SELECT role FROM project_members WHERE project_id = $1 AND user_id = $2",
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(role)
    }

    /// Lists all members of a project with their account fields
    pub async fn list_profiles_by_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<MemberProfile>, sqlx::Error> {
        let members = sqlx::query_as::<_, MemberProfile>(
            r#"
            SELECT m.user_id, u.email, u.name, m.role, m.created_at
            FROM project_members m
            JOIN users u ON u.id = m.user_id
            WHERE m.project_id = $1
            ORDER BY m.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(members)
    }

    /// Lists all memberships a user holds
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let memberships = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT project_id, user_id, role, created_at
            FROM project_members
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(memberships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_membership_default_role() {
        let create: CreateMembership = serde_json::from_str(&format!(
            r#"{{"project_id":"{}","user_id":"{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();
        assert_eq!(create.role, Role::Member);
    }

    // Database operations are covered by the API crate's integration suite.
}

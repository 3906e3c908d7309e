//! Project model and the transactional create-with-board flow.
//!
//! A project is a named container keyed by a short uppercase identifier.
//! Creating one also creates the creator's admin membership and the four
//! default board columns; all of it commits or none of it does, so a
//! project can never be observed without its columns.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE projects (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name VARCHAR(255) NOT NULL,
//!     key VARCHAR(16) NOT NULL UNIQUE,
//!     created_by UUID REFERENCES users(id) ON DELETE SET NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::column::{BoardColumn, DEFAULT_COLUMNS};
use super::role::Role;

/// A project: the uniquely-keyed container for a board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Short unique key, uppercase (e.g. "SB")
    pub key: String,

    /// The user who created the project (None if that account was deleted)
    pub created_by: Option<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display name (trimmed, non-empty)
    pub name: String,

    /// Unique key; normalized to uppercase before insertion
    pub key: String,

    /// The creating user, who becomes the project's admin
    pub created_by: Uuid,
}

impl Project {
    const COLUMNS: &'static str = "id, name, key, created_by, created_at, updated_at";

    /// Normalizes a raw project key: trimmed and uppercased
    pub fn normalize_key(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Creates a project with its creator membership and default columns
    ///
    /// One transaction inserts the project row, a membership binding the
    /// creator as Admin, and the four default columns at positions 0..3.
    /// Any failure (a key collision included) rolls the whole group back.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate key (unique constraint on `key`) or
    /// any other database failure; no partial state is left behind.
    pub async fn create_with_board(
        pool: &PgPool,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            r#"
            INSERT INTO projects (name, key, created_by)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            Self::COLUMNS
        ))
        .bind(&data.name)
        .bind(Self::normalize_key(&data.key))
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(project.id)
        .bind(data.created_by)
        .bind(Role::Admin)
        .execute(&mut *tx)
        .await?;

        for (position, title) in DEFAULT_COLUMNS.iter().enumerate() {
            BoardColumn::insert(&mut *tx, project.id, title, position as i32).await?;
        }

        tx.commit().await?;

        tracing::info!(project_id = %project.id, key = %project.key, "Created project with default board");
        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            Self::COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by its unique key
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE key = $1",
            Self::COLUMNS
        ))
        .bind(Self::normalize_key(key))
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(Project::normalize_key("sb"), "SB");
        assert_eq!(Project::normalize_key("  ops "), "OPS");
        assert_eq!(Project::normalize_key("Web2"), "WEB2");
    }

    #[test]
    fn test_default_columns_cover_board_order() {
        // Positions 0..3 follow array order.
        assert_eq!(DEFAULT_COLUMNS.len(), 4);
        assert_eq!(DEFAULT_COLUMNS[0], "Backlog");
        assert_eq!(DEFAULT_COLUMNS[3], "Done");
    }

    // The transactional create path is covered by the API crate's
    // integration suite (commit and rollback cases).
}

//! Board column model.
//!
//! Columns are the ordered stages of a project's board. Ordering is by
//! `position` ascending, with `created_at` breaking ties so "the first
//! column" is deterministic even when positions collide.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE board_columns (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
//!     title VARCHAR(100) NOT NULL,
//!     position INTEGER NOT NULL DEFAULT 0,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

/// Column titles created for every new project, in board order
pub const DEFAULT_COLUMNS: [&str; 4] = ["Backlog", "To Do", "In Progress", "Done"];

/// An ordered stage within a project's board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BoardColumn {
    /// Unique column ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// Column title shown on the board
    pub title: String,

    /// Sort position within the board (0-based)
    pub position: i32,

    /// When the column was created
    pub created_at: DateTime<Utc>,
}

impl BoardColumn {
    /// Inserts a column
    ///
    /// Generic over the executor so project creation can insert the default
    /// columns inside its transaction.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        project_id: Uuid,
        title: &str,
        position: i32,
    ) -> Result<Self, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            r#"
            INSERT INTO board_columns (project_id, title, position)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, title, position, created_at
            "#,
        )
        .bind(project_id)
        .bind(title)
        .bind(position)
        .fetch_one(executor)
        .await?;

        Ok(column)
    }

    /// Finds a column by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            "SELECT id, project_id, title, position, created_at FROM board_columns WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Lists a project's columns in board order
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let columns = sqlx::query_as::<_, BoardColumn>(
            r#"
            SELECT id, project_id, title, position, created_at
            FROM board_columns
            WHERE project_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(columns)
    }

    /// Finds the first column of a project (lowest position, oldest wins ties)
    ///
    /// Newly created tasks land here. Returns None for a project with zero
    /// columns, which task creation reports as a `no_columns` failure.
    pub async fn first_for_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let column = sqlx::query_as::<_, BoardColumn>(
            r#"
            SELECT id, project_id, title, position, created_at
            FROM board_columns
            WHERE project_id = $1
            ORDER BY position ASC, created_at ASC
            LIMIT 1
            "#,
        )
        .bind(project_id)
        .fetch_optional(pool)
        .await?;

        Ok(column)
    }

    /// Counts a project's columns
    pub async fn count_by_project(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM board_columns WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        assert_eq!(DEFAULT_COLUMNS, ["Backlog", "To Do", "In Progress", "Done"]);
    }
}

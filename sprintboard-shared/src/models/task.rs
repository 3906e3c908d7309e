//! Task model and database operations.
//!
//! A task belongs to exactly one project and one column at any time. Moving
//! a task is a single overwrite of its column reference; `position` is
//! stored for clients that want to order within a column but is never
//! recomputed by the server.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
//!     column_id UUID NOT NULL REFERENCES board_columns(id) ON DELETE CASCADE,
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT,
//!     due_date TIMESTAMPTZ,
//!     position INTEGER NOT NULL DEFAULT 0,
//!     created_by UUID REFERENCES users(id) ON DELETE SET NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE task_assignees (
//!     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     PRIMARY KEY (task_id, user_id)
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A task card on a project board
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning project
    pub project_id: Uuid,

    /// The column the task currently sits in
    pub column_id: Uuid,

    /// Task title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Client-managed sort position within the column; never recomputed here
    pub position: i32,

    /// The user who created the task (None if that account was deleted)
    pub created_by: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning project
    pub project_id: Uuid,

    /// Column to place the task in (the project's first column)
    pub column_id: Uuid,

    /// Task title (trimmed, non-empty)
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Creating user
    pub created_by: Option<Uuid>,
}

/// One (task, assignee) pair, used when assembling a board view
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskAssignee {
    /// Task ID
    pub task_id: Uuid,

    /// Assigned user ID
    pub user_id: Uuid,
}

impl Task {
    const COLUMNS: &'static str = "id, project_id, column_id, title, description, due_date, \
                                   position, created_by, created_at, updated_at";

    /// Creates a task at position 0 with no assignees
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (project_id, column_id, title, description, due_date, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            Self::COLUMNS
        ))
        .bind(data.project_id)
        .bind(data.column_id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.due_date)
        .bind(data.created_by)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            Self::COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Overwrites the task's column reference
    ///
    /// No position recompute and no concurrency token; repeating the same
    /// move yields the same state. Returns None if the task does not exist.
    pub async fn move_to_column(
        pool: &PgPool,
        id: Uuid,
        column_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET column_id = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            Self::COLUMNS
        ))
        .bind(id)
        .bind(column_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task; comments and assignee rows cascade with it
    ///
    /// Returns whether a row was actually removed. Callers that promise
    /// idempotent deletion ignore the flag.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists a project's tasks in column display order
    pub async fn list_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {}
            FROM tasks
            WHERE project_id = $1
            ORDER BY position ASC, created_at ASC
            "#,
            Self::COLUMNS
        ))
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Assigns a user to a task; repeating the assignment is a no-op
    pub async fn add_assignee(
        pool: &PgPool,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO task_assignees (task_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (task_id, user_id) DO NOTHING
            "#,
        )
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Removes a user from a task's assignees
    pub async fn remove_assignee(
        pool: &PgPool,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM task_assignees WHERE task_id = $1 AND user_id = $2",
        )
        .bind(task_id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all (task, assignee) pairs for a project's tasks
    pub async fn assignees_for_project(
        pool: &PgPool,
        project_id: Uuid,
    ) -> Result<Vec<TaskAssignee>, sqlx::Error> {
        let assignees = sqlx::query_as::<_, TaskAssignee>(
            r#"
            SELECT a.task_id, a.user_id
            FROM task_assignees a
            JOIN tasks t ON t.id = a.task_id
            WHERE t.project_id = $1
            ORDER BY a.created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(assignees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_struct() {
        let create = CreateTask {
            project_id: Uuid::new_v4(),
            column_id: Uuid::new_v4(),
            title: "Ship the login page".to_string(),
            description: None,
            due_date: None,
            created_by: None,
        };

        assert_eq!(create.title, "Ship the login page");
        assert!(create.description.is_none());
    }

    // Database operations are covered by the API crate's integration suite.
}

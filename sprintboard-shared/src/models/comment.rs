//! Task comment model.
//!
//! Comments are append-only: the application exposes no update or delete
//! path, and rows disappear only when their task cascades away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A comment on a task
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// The task the comment is attached to
    pub task_id: Uuid,

    /// The comment's author
    pub author_id: Uuid,

    /// Comment text
    pub body: String,

    /// When the comment was posted
    pub created_at: DateTime<Utc>,
}

/// Input for posting a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    /// Target task
    pub task_id: Uuid,

    /// Posting user
    pub author_id: Uuid,

    /// Comment text (trimmed, non-empty)
    pub body: String,
}

impl Comment {
    /// Appends a comment to a task
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (task_id, author_id, body)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, author_id, body, created_at
            "#,
        )
        .bind(data.task_id)
        .bind(data.author_id)
        .bind(data.body)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Lists a task's comments oldest-first
    pub async fn list_by_task(pool: &PgPool, task_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, task_id, author_id, body, created_at
            FROM comments
            WHERE task_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_comment_struct() {
        let create = CreateComment {
            task_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            body: "Looks ready for review".to_string(),
        };

        assert!(!create.body.is_empty());
    }
}

//! User model and database operations.
//!
//! Users authenticate with an email/password pair and participate in
//! projects through the membership model. Passwords are stored as Argon2id
//! hashes, never in plaintext.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     email CITEXT NOT NULL UNIQUE,
//!     name VARCHAR(255) NOT NULL,
//!     password_hash VARCHAR(255) NOT NULL,
//!     role project_role NOT NULL DEFAULT 'member',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     last_login_at TIMESTAMPTZ
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sprintboard_shared::models::user::{User, CreateUser};
//! use sprintboard_shared::models::role::Role;
//! # use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! let user = User::create(&pool, CreateUser {
//!     email: "user@example.com".to_string(),
//!     name: "Jordan".to_string(),
//!     password_hash: "$argon2id$...".to_string(),
//!     role: Role::Member,
//! }).await?;
//!
//! let found = User::find_by_email(&pool, "user@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::role::Role;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Email address (case-insensitive via CITEXT), unique across all users
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2id password hash (PHC string format)
    pub password_hash: String,

    /// Account-level role; seeds the role of new memberships
    pub role: Role,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Email address (stored case-insensitively)
    pub email: String,

    /// Display name
    pub name: String,

    /// Argon2id password hash (never the plaintext password)
    pub password_hash: String,

    /// Account-level role
    #[serde(default)]
    pub role: Role,
}

impl User {
    const COLUMNS: &'static str =
        "id, email, name, password_hash, role, created_at, updated_at, last_login_at";

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns an error if the email already exists (unique constraint) or
    /// the database is unreachable.
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, name, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            Self::COLUMNS
        ))
        .bind(data.email)
        .bind(data.name)
        .bind(data.password_hash)
        .bind(data.role)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            Self::COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by email address (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            Self::COLUMNS
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Stamps the last-login timestamp after successful authentication
    pub async fn update_last_login(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create = CreateUser {
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Member,
        };

        assert_eq!(create.email, "test@example.com");
        assert_eq!(create.role, Role::Member);
    }

    #[test]
    fn test_create_user_default_role_from_json() {
        // `role` omitted in the payload falls back to Member.
        let create: CreateUser = serde_json::from_str(
            r#"{"email":"a@b.c","name":"A","password_hash":"h"}"#,
        )
        .unwrap();
        assert_eq!(create.role, Role::Member);
    }

    // Database operations are covered by the API crate's integration suite.
}

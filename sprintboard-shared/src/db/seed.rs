//! Bootstrap seed routine.
//!
//! Installs the initial admin account, the "SprintBoard" project keyed
//! `SB`, the admin's membership, and the four default board columns. Every
//! step upserts against a real unique constraint (email, project key, the
//! membership's composite primary key), so running the routine any number
//! of times produces exactly one of each row group.
//!
//! The whole routine is one transaction: a failure part-way through leaves
//! nothing behind, and in particular can never produce a project with zero
//! columns.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{hash_password, PasswordError};
use crate::models::column::{BoardColumn, DEFAULT_COLUMNS};
use crate::models::role::Role;

/// Email of the seeded admin account
pub const ADMIN_EMAIL: &str = "admin@sprintboard.local";

/// Initial password of the seeded admin account
pub const ADMIN_PASSWORD: &str = "Admin@123!";

/// Display name of the seeded admin account
pub const ADMIN_NAME: &str = "SprintBoard Admin";

/// Key of the seeded project
pub const PROJECT_KEY: &str = "SB";

/// Name of the seeded project
pub const PROJECT_NAME: &str = "SprintBoard";

/// Error type for the seed routine
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Database operation failed
    #[error("Seed database operation failed: {0}")]
    Database(#[from] sqlx::Error),

    /// Hashing the admin password failed
    #[error("Seed password hashing failed: {0}")]
    Password(#[from] PasswordError),
}

/// Runs the seed routine
///
/// Safe to invoke on every startup; completed work is skipped.
pub async fn run(pool: &PgPool) -> Result<(), SeedError> {
    let mut tx = pool.begin().await?;

    // Admin user, keyed on email. The password is hashed only when the row
    // is actually missing; re-runs skip the expensive Argon2 work.
    let admin_id: Uuid = match sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(ADMIN_EMAIL)
        .fetch_optional(&mut *tx)
        .await?
    {
        Some(id) => id,
        None => {
            let password_hash = hash_password(ADMIN_PASSWORD)?;
            sqlx::query_scalar::<_, Uuid>(
                r#"
                INSERT INTO users (email, name, password_hash, role)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(ADMIN_EMAIL)
            .bind(ADMIN_NAME)
            .bind(password_hash)
            .bind(Role::Admin)
            .fetch_one(&mut *tx)
            .await?
        }
    };

    // Project, keyed on its unique key.
    let project_id: Uuid =
        match sqlx::query_scalar::<_, Uuid>("SELECT id FROM projects WHERE key = $1")
            .bind(PROJECT_KEY)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(id) => id,
            None => {
                sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO projects (name, key, created_by)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(PROJECT_NAME)
                .bind(PROJECT_KEY)
                .bind(admin_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

    // Membership, upserted against the composite primary key.
    sqlx::query(
        r#"
        INSERT INTO project_members (project_id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (project_id, user_id) DO NOTHING
        "#,
    )
    .bind(project_id)
    .bind(admin_id)
    .bind(Role::Admin)
    .execute(&mut *tx)
    .await?;

    // Default columns, only when the board is still empty.
    let (column_count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM board_columns WHERE project_id = $1")
            .bind(project_id)
            .fetch_one(&mut *tx)
            .await?;

    if column_count == 0 {
        for (position, title) in DEFAULT_COLUMNS.iter().enumerate() {
            BoardColumn::insert(&mut *tx, project_id, title, position as i32).await?;
        }
    }

    tx.commit().await?;

    info!(%admin_id, %project_id, "Seed routine completed");
    Ok(())
}

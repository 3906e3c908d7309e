//! Common test utilities for integration tests.
//!
//! Provides a [`TestContext`] that connects to the database named by
//! `DATABASE_URL`, runs migrations, creates a throwaway user, and builds
//! the router so tests can drive the API in-process.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sprintboard_api::app::{build_router, AppState};
use sprintboard_api::config::Config;
use sprintboard_shared::auth::jwt::{create_token, Claims, TokenType};
use sprintboard_shared::auth::password::hash_password;
use sprintboard_shared::models::role::Role;
use sprintboard_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path is relative to this crate's Cargo.toml.
        sqlx::migrate!("../sprintboard-shared/migrations")
            .run(&db)
            .await?;

        let user = User::create(
            &db,
            CreateUser {
                email: format!("test-{}@example.com", Uuid::new_v4()),
                name: "Test User".to_string(),
                password_hash: hash_password("Test@123!")?,
                role: Role::Member,
            },
        )
        .await?;

        let claims = Claims::new(user.id, user.email.clone(), user.role, TokenType::Access);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns the authorization header value for the context user
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Generates a unique project key for this test run
    pub fn unique_key() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("T{}", &suffix[..6].to_uppercase())
    }

    /// Creates a project through the API and returns its id
    ///
    /// Asserts the handler redirects to the new board and parses the
    /// project id out of the Location header.
    pub async fn create_project(&self, name: &str, key: &str) -> anyhow::Result<Uuid> {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/projects")
            .header("authorization", self.auth_header())
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!("name={}&key={}", name, key)))?;

        let response = self.app.clone().oneshot(request).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("redirect must carry a Location header")
            .to_string();

        // .../projects/{id}/board
        let id = location
            .rsplit('/')
            .nth(1)
            .expect("board URL must contain the project id");

        Ok(Uuid::parse_str(id)?)
    }

    /// Creates a task through the API in the given project
    pub async fn create_task(&self, project_id: Uuid, title: &str) -> anyhow::Result<StatusCode> {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/tasks")
            .header("authorization", self.auth_header())
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(format!("title={}&projectId={}", title, project_id)))?;

        let response = self.app.clone().oneshot(request).await?;
        Ok(response.status())
    }

    /// Removes rows created by this context
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        // Cascades take memberships, assignee rows, and comments with them.
        sqlx::query("DELETE FROM projects WHERE created_by = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(self.user.id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

/// Reads a JSON response body
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&body).expect("body should be JSON")
}

//! Application state and router builder.
//!
//! # Router layout
//!
//! ```text
//! /
//! ├── /health                          # Health check (public)
//! └── /v1/                             # API v1 (versioned)
//!     ├── /auth/                       # Authentication (public)
//!     │   ├── POST /register
//!     │   ├── POST /login
//!     │   └── POST /refresh
//!     ├── /projects/                   # Projects (authenticated)
//!     │   ├── POST /                   # Create project + default board
//!     │   ├── GET  /:id/board          # Typed board view
//!     │   └── GET  /:id/members        # Membership list
//!     └── /tasks/                      # Tasks (authenticated)
//!         ├── POST   /                 # Create task in first column
//!         ├── PATCH  /:id              # Move task between columns
//!         ├── DELETE /:id              # Delete task
//!         ├── PUT    /:id/assignees/:user_id
//!         ├── DELETE /:id/assignees/:user_id
//!         ├── POST   /:id/comments
//!         └── GET    /:id/comments
//! ```
//!
//! Middleware, outermost first: request tracing, CORS, security headers;
//! bearer-token authentication wraps the project and task subtrees.

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer, session::Session};
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
    Router,
};
use sprintboard_shared::auth::jwt;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each handler via Axum's `State` extractor; the pool and the
/// `Arc` make cloning cheap. Handlers receive the pool through this state
/// rather than any global handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session-token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Public: issuing a session requires no session.
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    let project_routes = Router::new()
        .route("/", post(routes::projects::create_project))
        .route("/:id/board", get(routes::projects::get_board))
        .route("/:id/members", get(routes::projects::list_members))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let task_routes = Router::new()
        .route("/", post(routes::tasks::create_task))
        .route("/:id", patch(routes::tasks::move_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/assignees/:user_id", put(routes::tasks::assign_user))
        .route(
            "/:id/assignees/:user_id",
            delete(routes::tasks::unassign_user),
        )
        .route("/:id/comments", post(routes::comments::add_comment))
        .route("/:id/comments", get(routes::comments::list_comments))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/projects", project_routes)
        .nest("/tasks", task_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .layer(SecurityHeadersLayer::new())
        .with_state(state)
}

/// Session authentication middleware layer
///
/// Validates the bearer access token from the Authorization header and
/// injects a [`Session`] into request extensions.
async fn session_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_access_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(Session::from_claims(claims));

    Ok(next.run(req).await)
}

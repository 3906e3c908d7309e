//! API route handlers, organized by resource:
//!
//! - `health`: health check
//! - `auth`: registration, login, token refresh
//! - `projects`: project creation, board view, member listing
//! - `tasks`: task creation, moves, deletion, assignees
//! - `comments`: task comments

use serde::{Deserialize, Serialize};

pub mod auth;
pub mod comments;
pub mod health;
pub mod projects;
pub mod tasks;

/// Plain acknowledgement body for idempotent mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    /// Always true on success
    pub ok: bool,
}

impl OkResponse {
    /// The canonical success body
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

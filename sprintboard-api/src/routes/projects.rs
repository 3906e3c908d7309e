//! Project endpoints: creation, board view, member listing.
//!
//! Project creation is the one multi-row write in the API: the project row,
//! the creator's admin membership, and the four default columns commit as a
//! single transaction inside [`Project::create_with_board`].
//!
//! The board view is the typed structure handed to clients: project
//! identity plus ordered columns, each carrying its ordered tasks and their
//! assignee ids. It is assembled and validated once, here, at the
//! data-loading boundary.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    session::Session,
};
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use chrono::{DateTime, Utc};
use sprintboard_shared::models::{
    column::BoardColumn,
    membership::{MemberProfile, ProjectMember},
    project::{CreateProject, Project},
    task::{Task, TaskAssignee},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Create-project form body
#[derive(Debug, Deserialize)]
pub struct CreateProjectForm {
    /// Display name
    pub name: String,

    /// Short unique key; normalized to uppercase
    pub key: String,
}

/// Typed board payload
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardView {
    /// Project ID
    pub project_id: Uuid,

    /// Project display name
    pub name: String,

    /// Project key
    pub key: String,

    /// Columns in board order, each with its tasks
    pub columns: Vec<BoardColumnView>,
}

/// One column of the board payload
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardColumnView {
    /// Column ID
    pub id: Uuid,

    /// Column title
    pub title: String,

    /// Sort position
    pub position: i32,

    /// Tasks in display order
    pub tasks: Vec<BoardTaskView>,
}

/// One task of the board payload
#[derive(Debug, Serialize, Deserialize)]
pub struct BoardTaskView {
    /// Task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Client-managed sort position
    pub position: i32,

    /// IDs of assigned users
    pub assignee_ids: Vec<Uuid>,
}

impl BoardView {
    /// Groups tasks and assignees under their columns
    ///
    /// `columns` and `tasks` are expected in display order already; the
    /// grouping preserves it. A task pointing at a column outside the
    /// project is dropped rather than given an invented lane.
    pub fn assemble(
        project: Project,
        columns: Vec<BoardColumn>,
        tasks: Vec<Task>,
        assignees: Vec<TaskAssignee>,
    ) -> Self {
        let mut assignee_map: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for a in assignees {
            assignee_map.entry(a.task_id).or_default().push(a.user_id);
        }

        let mut tasks_by_column: HashMap<Uuid, Vec<BoardTaskView>> = HashMap::new();
        for task in tasks {
            let view = BoardTaskView {
                id: task.id,
                title: task.title,
                description: task.description,
                due_date: task.due_date,
                position: task.position,
                assignee_ids: assignee_map.remove(&task.id).unwrap_or_default(),
            };
            tasks_by_column.entry(task.column_id).or_default().push(view);
        }

        let columns = columns
            .into_iter()
            .map(|column| BoardColumnView {
                tasks: tasks_by_column.remove(&column.id).unwrap_or_default(),
                id: column.id,
                title: column.title,
                position: column.position,
            })
            .collect();

        Self {
            project_id: project.id,
            name: project.name,
            key: project.key,
            columns,
        }
    }
}

/// Create a project
///
/// `POST /v1/projects` with form fields `name` and `key`. Both must be
/// non-empty after trimming; the key is uppercased. On success the caller
/// is redirected to the new project's board.
///
/// # Errors
///
/// - `400`: empty name or key
/// - `409`: key already taken (nothing is inserted)
pub async fn create_project(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateProjectForm>,
) -> ApiResult<Redirect> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("Project name must not be empty".to_string()));
    }

    let key = Project::normalize_key(&form.key);
    if key.is_empty() {
        return Err(ApiError::BadRequest("Project key must not be empty".to_string()));
    }

    let project = Project::create_with_board(
        &state.db,
        CreateProject {
            name: name.to_string(),
            key,
            created_by: session.user_id,
        },
    )
    .await?;

    Ok(Redirect::to(&state.config.board_url(project.id)))
}

/// Fetch the typed board view
///
/// `GET /v1/projects/:id/board`. Requires project membership.
pub async fn get_board(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<BoardView>> {
    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    session.require_member(&state.db, project.id).await?;

    let columns = BoardColumn::list_by_project(&state.db, project.id).await?;
    let tasks = Task::list_by_project(&state.db, project.id).await?;
    let assignees = Task::assignees_for_project(&state.db, project.id).await?;

    Ok(Json(BoardView::assemble(project, columns, tasks, assignees)))
}

/// List the project's members
///
/// `GET /v1/projects/:id/members`. Requires project membership.
pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
    Path(project_id): Path<Uuid>,
) -> ApiResult<Json<Vec<MemberProfile>>> {
    let project = Project::find_by_id(&state.db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;

    session.require_member(&state.db, project.id).await?;

    let members = ProjectMember::list_profiles_by_project(&state.db, project.id).await?;

    Ok(Json(members))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn project() -> Project {
        Project {
            id: Uuid::new_v4(),
            name: "SprintBoard".to_string(),
            key: "SB".to_string(),
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn column(project_id: Uuid, title: &str, position: i32) -> BoardColumn {
        BoardColumn {
            id: Uuid::new_v4(),
            project_id,
            title: title.to_string(),
            position,
            created_at: Utc::now(),
        }
    }

    fn task(project_id: Uuid, column_id: Uuid, title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            project_id,
            column_id,
            title: title.to_string(),
            description: None,
            due_date: None,
            position: 0,
            created_by: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_assemble_groups_tasks_under_columns() {
        let p = project();
        let backlog = column(p.id, "Backlog", 0);
        let done = column(p.id, "Done", 3);

        let t1 = task(p.id, backlog.id, "first");
        let t2 = task(p.id, backlog.id, "second");
        let t3 = task(p.id, done.id, "shipped");

        let board = BoardView::assemble(
            p,
            vec![backlog.clone(), done.clone()],
            vec![t1.clone(), t2.clone(), t3.clone()],
            vec![],
        );

        assert_eq!(board.key, "SB");
        assert_eq!(board.columns.len(), 2);
        assert_eq!(board.columns[0].title, "Backlog");
        assert_eq!(board.columns[0].tasks.len(), 2);
        assert_eq!(board.columns[0].tasks[0].title, "first");
        assert_eq!(board.columns[0].tasks[1].title, "second");
        assert_eq!(board.columns[1].tasks.len(), 1);
        assert_eq!(board.columns[1].tasks[0].title, "shipped");
    }

    #[test]
    fn test_assemble_attaches_assignees() {
        let p = project();
        let col = column(p.id, "To Do", 1);
        let t = task(p.id, col.id, "assigned");
        let user = Uuid::new_v4();

        let board = BoardView::assemble(
            p,
            vec![col],
            vec![t.clone()],
            vec![TaskAssignee {
                task_id: t.id,
                user_id: user,
            }],
        );

        assert_eq!(board.columns[0].tasks[0].assignee_ids, vec![user]);
    }

    #[test]
    fn test_assemble_empty_board() {
        let p = project();
        let board = BoardView::assemble(p, vec![], vec![], vec![]);
        assert!(board.columns.is_empty());
    }
}

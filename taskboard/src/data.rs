//! Database rows and their conversions into the API views.

use std::fmt::{Display, Formatter};
use api_data::model::{CommentView, MemberView, ProjectView, TaskView, UserView, WorkspaceView};
use api_data::{CommentId, ProjectId, Role, TaskId, TaskPriority, TaskStatus, UserId, WorkspaceId};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Identifies a refresh session. Access tokens carry it so that logging out
/// invalidates them before they expire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, sqlx::Type)]
#[sqlx(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0.hyphenated(), f)
    }
}

#[derive(Clone, Debug, FromRow)]
pub struct UserRow {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, FromRow)]
pub struct RefreshSessionRow {
    pub id: SessionId,
    pub user_id: UserId,
    pub token: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, FromRow)]
pub struct WorkspaceRow {
    pub id: WorkspaceId,
    pub name: String,
    pub owner_id: UserId,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, FromRow)]
pub struct WorkspaceWithRole {
    #[sqlx(flatten)]
    pub workspace: WorkspaceRow,
    pub role: Role,
}

#[derive(Clone, Debug, FromRow)]
pub struct MembershipRow {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub role: Role,
    pub joined_at: OffsetDateTime,
}

/// A membership joined with the member's user record.
#[derive(Clone, Debug, FromRow)]
pub struct MemberRow {
    pub workspace_id: WorkspaceId,
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub joined_at: OffsetDateTime,
}

#[derive(Clone, Debug, FromRow)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub workspace_id: WorkspaceId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, FromRow)]
pub struct TaskRow {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_by: UserId,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct NewComment {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub content: String,
    pub created_at: OffsetDateTime,
}

/// A comment joined with its author's name.
#[derive(Clone, Debug, FromRow)]
pub struct CommentRow {
    pub id: CommentId,
    pub task_id: TaskId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<UserRow> for UserView {
    fn from(value: UserRow) -> Self {
        UserView {
            id: value.id,
            email: value.email,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

impl From<WorkspaceRow> for WorkspaceView {
    fn from(value: WorkspaceRow) -> Self {
        WorkspaceView {
            id: value.id,
            name: value.name,
            owner_id: value.owner_id,
            role: None,
            created_at: value.created_at,
        }
    }
}

impl From<WorkspaceWithRole> for WorkspaceView {
    fn from(value: WorkspaceWithRole) -> Self {
        WorkspaceView {
            role: Some(value.role),
            ..value.workspace.into()
        }
    }
}

impl From<MemberRow> for MemberView {
    fn from(value: MemberRow) -> Self {
        MemberView {
            workspace_id: value.workspace_id,
            user_id: value.user_id,
            email: value.email,
            name: value.name,
            role: value.role,
            joined_at: value.joined_at,
        }
    }
}

impl From<ProjectRow> for ProjectView {
    fn from(value: ProjectRow) -> Self {
        ProjectView {
            id: value.id,
            workspace_id: value.workspace_id,
            name: value.name,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

impl From<TaskRow> for TaskView {
    fn from(value: TaskRow) -> Self {
        TaskView {
            id: value.id,
            project_id: value.project_id,
            title: value.title,
            description: value.description,
            status: value.status,
            priority: value.priority,
            created_by: value.created_by,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<CommentRow> for CommentView {
    fn from(value: CommentRow) -> Self {
        CommentView {
            id: value.id,
            task_id: value.task_id,
            author_id: value.author_id,
            author_name: value.author_name,
            content: value.content,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

use api_data::{CommentId, ProjectId, Role, TaskId, UserId, WorkspaceId};
use log::warn;
use sqlx::SqliteConnection;
use crate::data::{CommentRow, ProjectRow, TaskRow};
use crate::db;
use crate::service::ServiceError;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Required {
    AnyMember,
    Manager,
    Owner,
}

impl Required {
    fn admits(self, role: Role) -> bool {
        match self {
            Required::AnyMember => true,
            Required::Manager => role.can_manage(),
            Required::Owner => role.is_owner(),
        }
    }
}

/// The caller's role, if it satisfies `required`. Otherwise a permission
/// error carrying `denial`.
pub(super) async fn require_role(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
    user_id: UserId,
    required: Required,
    denial: &str,
) -> Result<Role, ServiceError> {
    match db::members::find_membership(conn, workspace_id, user_id).await? {
        Some(membership) if required.admits(membership.role) => Ok(membership.role),
        membership => {
            warn!(
                "user {user_id} with role {:?} denied in workspace {workspace_id}: {denial}",
                membership.map(|m| m.role),
            );
            Err(ServiceError::Permission(denial.into()))
        },
    }
}

pub(super) async fn project_in_workspace(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
    project_id: ProjectId,
) -> Result<ProjectRow, ServiceError> {
    db::projects::find_project(conn, project_id).await?
        .filter(|p| p.workspace_id == workspace_id)
        .ok_or_else(|| ServiceError::NotFound("Project not found in this workspace".into()))
}

pub(super) async fn task_in_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
    task_id: TaskId,
) -> Result<TaskRow, ServiceError> {
    db::tasks::find_task(conn, task_id).await?
        .filter(|t| t.project_id == project_id)
        .ok_or_else(|| ServiceError::NotFound("Task not found in this project".into()))
}

pub(super) async fn comment_on_task(
    conn: &mut SqliteConnection,
    task_id: TaskId,
    comment_id: CommentId,
) -> Result<CommentRow, ServiceError> {
    db::comments::find_comment(conn, comment_id).await?
        .filter(|c| c.task_id == task_id)
        .ok_or_else(|| ServiceError::NotFound("Comment not found on this task".into()))
}

use api_data::model::{CommentListResponse, CommentResponse, CreateCommentRequest, MessageResponse, UpdateCommentRequest};
use api_data::{CommentId, ProjectId, TaskId, UserId, WorkspaceId};
use log::{debug, info, warn};
use sqlx::SqliteConnection;
use time::OffsetDateTime;
use crate::data::{NewComment, TaskRow};
use crate::db::{self, DbPool};
use crate::service::access::{comment_on_task, project_in_workspace, require_role, task_in_project, Required};
use crate::service::validation::{max_len, required};
use crate::service::{Limits, ServiceError};

const UPDATE_DENIED: &str = "You do not have permission to update this comment";
const DELETE_DENIED: &str = "You do not have permission to delete this comment";

pub struct CommentService {
    db: DbPool,
    limits: Limits,
}

/// Locates a task inside its project and workspace.
#[derive(Clone, Copy, Debug)]
pub struct TaskPath {
    pub workspace_id: WorkspaceId,
    pub project_id: ProjectId,
    pub task_id: TaskId,
}

impl CommentService {
    pub fn new(db: DbPool, limits: Limits) -> Self {
        CommentService { db, limits }
    }

    pub async fn create(
        &self,
        caller: UserId,
        path: TaskPath,
        request: &CreateCommentRequest,
    ) -> Result<CommentResponse, ServiceError> {
        let content = required(request.content.as_deref(), "Comment content is required")?;
        max_len(&content, self.limits.max_text_len, "Comment")?;
        debug!("user {caller} commenting on task {}", path.task_id);

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            path.workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to comment in this workspace",
        ).await?;
        resolve_task(&mut conn, path).await?;
        let comment = NewComment {
            id: CommentId::generate(),
            task_id: path.task_id,
            author_id: caller,
            content,
            created_at: OffsetDateTime::now_utc(),
        };
        db::comments::insert_comment(&mut conn, &comment).await?;
        let comment = comment_on_task(&mut conn, path.task_id, comment.id).await?;
        info!("user {caller} added comment {} to task {}", comment.id, path.task_id);

        Ok(
            CommentResponse {
                message: "Comment added successfully".into(),
                comment: comment.into(),
            }
        )
    }

    pub async fn list(
        &self,
        caller: UserId,
        path: TaskPath,
    ) -> Result<CommentListResponse, ServiceError> {
        debug!("user {caller} listing comments of task {}", path.task_id);
        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            path.workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to view comments in this workspace",
        ).await?;
        resolve_task(&mut conn, path).await?;
        let comments = db::comments::list_comments(&mut conn, path.task_id).await?;
        Ok(
            CommentListResponse {
                comments: comments.into_iter().map(Into::into).collect(),
            }
        )
    }

    /// Only the author may edit a comment.
    pub async fn update(
        &self,
        caller: UserId,
        path: TaskPath,
        comment_id: CommentId,
        request: &UpdateCommentRequest,
    ) -> Result<CommentResponse, ServiceError> {
        let content = required(request.content.as_deref(), "Comment content cannot be empty")?;
        max_len(&content, self.limits.max_text_len, "Comment")?;
        debug!("user {caller} updating comment {comment_id}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            path.workspace_id,
            caller,
            Required::AnyMember,
            UPDATE_DENIED,
        ).await?;
        resolve_task(&mut conn, path).await?;
        let comment = comment_on_task(&mut conn, path.task_id, comment_id).await?;
        if comment.author_id != caller {
            warn!("user {caller} is not the author of comment {comment_id}");
            return Err(ServiceError::Permission(UPDATE_DENIED.into()));
        }
        db::comments::update_comment_content(
            &mut conn,
            comment_id,
            &content,
            OffsetDateTime::now_utc(),
        ).await?;
        let comment = comment_on_task(&mut conn, path.task_id, comment_id).await?;
        info!("user {caller} updated comment {comment_id}");

        Ok(
            CommentResponse {
                message: "Comment updated successfully".into(),
                comment: comment.into(),
            }
        )
    }

    /// The author may delete a comment, and so may workspace managers.
    pub async fn delete(
        &self,
        caller: UserId,
        path: TaskPath,
        comment_id: CommentId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} deleting comment {comment_id}");
        let mut conn = self.db.acquire().await?;
        let role = require_role(
            &mut conn,
            path.workspace_id,
            caller,
            Required::AnyMember,
            DELETE_DENIED,
        ).await?;
        resolve_task(&mut conn, path).await?;
        let comment = comment_on_task(&mut conn, path.task_id, comment_id).await?;
        if comment.author_id != caller && !role.can_manage() {
            warn!("user {caller} is neither author nor manager of comment {comment_id}");
            return Err(ServiceError::Permission(DELETE_DENIED.into()));
        }
        db::comments::delete_comment(&mut conn, comment_id).await?;
        info!("user {caller} deleted comment {comment_id}");

        Ok(MessageResponse::new("Comment deleted successfully"))
    }
}

async fn resolve_task(
    conn: &mut SqliteConnection,
    path: TaskPath,
) -> Result<TaskRow, ServiceError> {
    project_in_workspace(conn, path.workspace_id, path.project_id).await?;
    task_in_project(conn, path.project_id, path.task_id).await
}

use api_data::model::{CreateTaskRequest, MessageResponse, TaskListResponse, TaskResponse, UpdateTaskRequest};
use api_data::{ProjectId, TaskId, TaskStatus, UserId, WorkspaceId};
use log::{debug, info, warn};
use time::OffsetDateTime;
use crate::data::TaskRow;
use crate::db::{self, DbPool};
use crate::service::access::{project_in_workspace, require_role, task_in_project, Required};
use crate::service::validation::{max_len, nonblank_if_present, optional, required};
use crate::service::{Limits, ServiceError};

const DELETE_DENIED: &str = "You do not have permission to delete this task";

pub struct TaskService {
    db: DbPool,
    limits: Limits,
}

impl TaskService {
    pub fn new(db: DbPool, limits: Limits) -> Self {
        TaskService { db, limits }
    }

    pub async fn create(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        request: &CreateTaskRequest,
    ) -> Result<TaskResponse, ServiceError> {
        let title = required(request.title.as_deref(), "Task title is required")?;
        max_len(&title, self.limits.max_name_len, "Task title")?;
        let description = optional(request.description.as_deref());
        if let Some(ref description) = description {
            max_len(description, self.limits.max_text_len, "Task description")?;
        }
        debug!("user {caller} creating task \"{title}\" in project {project_id}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to create tasks in this workspace",
        ).await?;
        project_in_workspace(&mut conn, workspace_id, project_id).await?;
        let now = OffsetDateTime::now_utc();
        let task = TaskRow {
            id: TaskId::generate(),
            project_id,
            title,
            description,
            status: request.status.unwrap_or_default(),
            priority: request.priority.unwrap_or_default(),
            created_by: caller,
            created_at: now,
            updated_at: now,
        };
        db::tasks::insert_task(&mut conn, &task).await?;
        info!("user {caller} created task {} in project {project_id}", task.id);

        Ok(
            TaskResponse {
                message: "Task created successfully".into(),
                task: task.into(),
            }
        )
    }

    pub async fn list(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        status: Option<TaskStatus>,
    ) -> Result<TaskListResponse, ServiceError> {
        debug!("user {caller} listing tasks of project {project_id}");
        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to view tasks in this workspace",
        ).await?;
        project_in_workspace(&mut conn, workspace_id, project_id).await?;
        let tasks = db::tasks::list_tasks(&mut conn, project_id, status).await?;
        Ok(
            TaskListResponse {
                tasks: tasks.into_iter().map(Into::into).collect(),
            }
        )
    }

    /// Partial update by any member. A blank description clears it.
    pub async fn update(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
        request: &UpdateTaskRequest,
    ) -> Result<TaskResponse, ServiceError> {
        let title = nonblank_if_present(request.title.as_deref(), "Task title cannot be empty")?;
        if let Some(ref title) = title {
            max_len(title, self.limits.max_name_len, "Task title")?;
        }
        if let Some(ref description) = request.description {
            max_len(description.trim(), self.limits.max_text_len, "Task description")?;
        }
        debug!("user {caller} updating task {task_id}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to update tasks in this workspace",
        ).await?;
        project_in_workspace(&mut conn, workspace_id, project_id).await?;
        let mut task = task_in_project(&mut conn, project_id, task_id).await?;
        if let Some(title) = title {
            task.title = title;
        }
        if request.description.is_some() {
            task.description = optional(request.description.as_deref());
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }
        task.updated_at = OffsetDateTime::now_utc();
        db::tasks::update_task(&mut conn, &task).await?;
        info!("user {caller} updated task {task_id}");

        Ok(
            TaskResponse {
                message: "Task updated successfully".into(),
                task: task.into(),
            }
        )
    }

    /// The creator may delete a task, and so may workspace managers.
    pub async fn delete(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} deleting task {task_id}");
        let mut tx = self.db.begin().await?;
        let role = require_role(
            &mut tx,
            workspace_id,
            caller,
            Required::AnyMember,
            DELETE_DENIED,
        ).await?;
        project_in_workspace(&mut tx, workspace_id, project_id).await?;
        let task = task_in_project(&mut tx, project_id, task_id).await?;
        if task.created_by != caller && !role.can_manage() {
            warn!("user {caller} is neither creator nor manager of task {task_id}");
            return Err(ServiceError::Permission(DELETE_DENIED.into()));
        }
        db::comments::delete_comments_of_task(&mut tx, task_id).await?;
        db::tasks::delete_task(&mut tx, task_id).await?;
        tx.commit().await.map_err(db::DbError::from)?;
        info!("user {caller} deleted task {task_id}");

        Ok(MessageResponse::new("Task deleted successfully"))
    }
}

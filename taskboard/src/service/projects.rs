use api_data::model::{CreateProjectRequest, MessageResponse, ProjectListResponse, ProjectResponse, UpdateProjectRequest};
use api_data::{ProjectId, UserId, WorkspaceId};
use log::{debug, info};
use time::OffsetDateTime;
use crate::data::ProjectRow;
use crate::db::{self, DbPool};
use crate::service::access::{project_in_workspace, require_role, Required};
use crate::service::validation::{max_len, nonblank_if_present, optional, required};
use crate::service::{Limits, ServiceError};

pub struct ProjectService {
    db: DbPool,
    limits: Limits,
}

impl ProjectService {
    pub fn new(db: DbPool, limits: Limits) -> Self {
        ProjectService { db, limits }
    }

    pub async fn create(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        request: &CreateProjectRequest,
    ) -> Result<ProjectResponse, ServiceError> {
        let name = required(request.name.as_deref(), "Project name is required")?;
        max_len(&name, self.limits.max_name_len, "Project name")?;
        let description = optional(request.description.as_deref());
        if let Some(ref description) = description {
            max_len(description, self.limits.max_text_len, "Project description")?;
        }
        debug!("user {caller} creating project \"{name}\" in workspace {workspace_id}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to create projects in this workspace",
        ).await?;
        let project = ProjectRow {
            id: ProjectId::generate(),
            workspace_id,
            name,
            description,
            created_at: OffsetDateTime::now_utc(),
        };
        db::projects::insert_project(&mut conn, &project).await?;
        info!("user {caller} created project {} in workspace {workspace_id}", project.id);

        Ok(
            ProjectResponse {
                message: "Project created successfully".into(),
                project: project.into(),
            }
        )
    }

    pub async fn list(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<ProjectListResponse, ServiceError> {
        debug!("user {caller} listing projects of workspace {workspace_id}");
        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to view projects in this workspace",
        ).await?;
        let projects = db::projects::list_projects(&mut conn, workspace_id).await?;
        Ok(
            ProjectListResponse {
                projects: projects.into_iter().map(Into::into).collect(),
            }
        )
    }

    /// Partial update. A blank description clears it.
    pub async fn update(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        request: &UpdateProjectRequest,
    ) -> Result<ProjectResponse, ServiceError> {
        let name = nonblank_if_present(request.name.as_deref(), "Project name cannot be empty")?;
        if let Some(ref name) = name {
            max_len(name, self.limits.max_name_len, "Project name")?;
        }
        if let Some(ref description) = request.description {
            max_len(description.trim(), self.limits.max_text_len, "Project description")?;
        }
        debug!("user {caller} updating project {project_id}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to update projects in this workspace",
        ).await?;
        let mut project = project_in_workspace(&mut conn, workspace_id, project_id).await?;
        if let Some(name) = name {
            project.name = name;
        }
        if request.description.is_some() {
            project.description = optional(request.description.as_deref());
        }
        db::projects::update_project(&mut conn, &project).await?;
        info!("user {caller} updated project {project_id}");

        Ok(
            ProjectResponse {
                message: "Project updated successfully".into(),
                project: project.into(),
            }
        )
    }

    /// Delete the project with its tasks and their comments.
    pub async fn delete(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} deleting project {project_id}");
        let mut tx = self.db.begin().await?;
        require_role(
            &mut tx,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to delete projects in this workspace",
        ).await?;
        project_in_workspace(&mut tx, workspace_id, project_id).await?;
        db::comments::delete_comments_of_project(&mut tx, project_id).await?;
        db::tasks::delete_tasks_of_project(&mut tx, project_id).await?;
        db::projects::delete_project(&mut tx, project_id).await?;
        tx.commit().await.map_err(db::DbError::from)?;
        info!("user {caller} deleted project {project_id}");

        Ok(MessageResponse::new("Project deleted successfully"))
    }
}

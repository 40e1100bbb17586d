use api_data::model::{CreateWorkspaceRequest, MessageResponse, UpdateWorkspaceRequest, WorkspaceListResponse, WorkspaceResponse};
use api_data::{Role, UserId, WorkspaceId};
use log::{debug, info};
use time::OffsetDateTime;
use crate::data::{MembershipRow, WorkspaceRow, WorkspaceWithRole};
use crate::db::{self, DbPool};
use crate::service::access::{require_role, Required};
use crate::service::validation::{max_len, required};
use crate::service::{Limits, ServiceError};

const NAME_REQUIRED: &str = "Workspace name is required";

pub struct WorkspaceService {
    db: DbPool,
    limits: Limits,
}

impl WorkspaceService {
    pub fn new(db: DbPool, limits: Limits) -> Self {
        WorkspaceService { db, limits }
    }

    /// Create a workspace owned by the caller, together with the caller's
    /// OWNER membership.
    pub async fn create(
        &self,
        caller: UserId,
        request: &CreateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, ServiceError> {
        let name = required(request.name.as_deref(), NAME_REQUIRED)?;
        max_len(&name, self.limits.max_name_len, "Workspace name")?;
        debug!("user {caller} creating workspace \"{name}\"");

        let now = OffsetDateTime::now_utc();
        let workspace = WorkspaceRow {
            id: WorkspaceId::generate(),
            name,
            owner_id: caller,
            created_at: now,
        };
        let mut tx = self.db.begin().await?;
        db::workspaces::insert_workspace(&mut tx, &workspace).await?;
        db::members::insert_membership(
            &mut tx,
            &MembershipRow {
                workspace_id: workspace.id,
                user_id: caller,
                role: Role::Owner,
                joined_at: now,
            },
        ).await?;
        tx.commit().await.map_err(db::DbError::from)?;
        info!("user {caller} created workspace {}", workspace.id);

        Ok(
            WorkspaceResponse {
                message: "Workspace created successfully".into(),
                workspace: WorkspaceWithRole {
                    workspace,
                    role: Role::Owner,
                }.into(),
            }
        )
    }

    pub async fn list(
        &self,
        caller: UserId,
    ) -> Result<WorkspaceListResponse, ServiceError> {
        debug!("listing workspaces of user {caller}");
        let mut conn = self.db.acquire().await?;
        let workspaces = db::workspaces::list_workspaces_for_user(&mut conn, caller).await?;
        Ok(
            WorkspaceListResponse {
                workspaces: workspaces.into_iter().map(Into::into).collect(),
            }
        )
    }

    pub async fn update(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        request: &UpdateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, ServiceError> {
        let name = required(request.name.as_deref(), NAME_REQUIRED)?;
        max_len(&name, self.limits.max_name_len, "Workspace name")?;
        debug!("user {caller} renaming workspace {workspace_id}");

        let mut conn = self.db.acquire().await?;
        let role = require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to update this workspace",
        ).await?;
        let workspace = db::workspaces::rename_workspace(&mut conn, workspace_id, &name).await?
            .ok_or_else(|| ServiceError::NotFound("Workspace not found".into()))?;
        info!("user {caller} renamed workspace {workspace_id}");

        Ok(
            WorkspaceResponse {
                message: "Workspace updated successfully".into(),
                workspace: WorkspaceWithRole { workspace, role }.into(),
            }
        )
    }

    /// Delete the workspace with everything in it. Only the owner may.
    pub async fn delete(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} deleting workspace {workspace_id}");
        let mut tx = self.db.begin().await?;
        require_role(
            &mut tx,
            workspace_id,
            caller,
            Required::Owner,
            "Only the workspace owner can delete the workspace",
        ).await?;
        db::comments::delete_comments_of_workspace(&mut tx, workspace_id).await?;
        db::tasks::delete_tasks_of_workspace(&mut tx, workspace_id).await?;
        db::projects::delete_projects_of_workspace(&mut tx, workspace_id).await?;
        db::members::delete_memberships_of_workspace(&mut tx, workspace_id).await?;
        db::workspaces::delete_workspace(&mut tx, workspace_id).await?;
        tx.commit().await.map_err(db::DbError::from)?;
        info!("user {caller} deleted workspace {workspace_id}");

        Ok(MessageResponse::new("Workspace deleted successfully"))
    }
}

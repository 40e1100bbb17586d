use api_data::model::{AddMemberRequest, MemberListResponse, MemberResponse, MessageResponse};
use api_data::{Role, UserId, WorkspaceId};
use log::{debug, info};
use time::OffsetDateTime;
use crate::data::MembershipRow;
use crate::db::{self, DbError, DbPool};
use crate::service::access::{require_role, Required};
use crate::service::validation::required;
use crate::service::ServiceError;

pub struct MemberService {
    db: DbPool,
}

impl MemberService {
    pub fn new(db: DbPool) -> Self {
        MemberService { db }
    }

    pub async fn list(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<MemberListResponse, ServiceError> {
        debug!("user {caller} listing members of workspace {workspace_id}");
        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You do not have permission to view members of this workspace",
        ).await?;
        let members = db::members::list_members(&mut conn, workspace_id).await?;
        Ok(
            MemberListResponse {
                members: members.into_iter().map(Into::into).collect(),
            }
        )
    }

    /// Add an existing user by email. Ownership is never granted this way.
    pub async fn add(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        request: &AddMemberRequest,
    ) -> Result<MemberResponse, ServiceError> {
        let email = required(request.email.as_deref(), "Member email is required")?
            .to_lowercase();
        let role = request.role.unwrap_or(Role::Member);
        if role.is_owner() {
            return Err(ServiceError::Validation(
                "Members can only be added as ADMIN or MEMBER".into()
            ));
        }
        debug!("user {caller} adding \"{email}\" to workspace {workspace_id} as {role}");

        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to add members to this workspace",
        ).await?;
        let user = db::users::find_user_by_email(&mut conn, &email).await?
            .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;
        let membership = MembershipRow {
            workspace_id,
            user_id: user.id,
            role,
            joined_at: OffsetDateTime::now_utc(),
        };
        match db::members::insert_membership(&mut conn, &membership).await {
            Ok(()) => (),
            Err(DbError::UniqueViolation) => return Err(ServiceError::Validation(
                "User is already a member of this workspace".into()
            )),
            Err(e) => return Err(e.into()),
        }
        let member = db::members::find_member(&mut conn, workspace_id, user.id).await?
            .ok_or_else(|| ServiceError::NotFound("Member not found in this workspace".into()))?;
        info!("user {caller} added user {} to workspace {workspace_id}", user.id);

        Ok(
            MemberResponse {
                message: "Member added successfully".into(),
                member: member.into(),
            }
        )
    }

    pub async fn remove(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} removing user {user_id} from workspace {workspace_id}");
        let mut conn = self.db.acquire().await?;
        require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::Manager,
            "You do not have permission to remove members from this workspace",
        ).await?;
        let target = db::members::find_membership(&mut conn, workspace_id, user_id).await?
            .ok_or_else(|| ServiceError::NotFound("Member not found in this workspace".into()))?;
        if target.role.is_owner() {
            return Err(ServiceError::Validation("The workspace owner cannot be removed".into()));
        }
        db::members::delete_membership(&mut conn, workspace_id, user_id).await?;
        info!("user {caller} removed user {user_id} from workspace {workspace_id}");

        Ok(MessageResponse::new("Member removed successfully"))
    }

    pub async fn leave(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<MessageResponse, ServiceError> {
        debug!("user {caller} leaving workspace {workspace_id}");
        let mut conn = self.db.acquire().await?;
        let role = require_role(
            &mut conn,
            workspace_id,
            caller,
            Required::AnyMember,
            "You are not a member of this workspace",
        ).await?;
        if role.is_owner() {
            return Err(ServiceError::Validation(
                "The workspace owner cannot leave the workspace".into()
            ));
        }
        db::members::delete_membership(&mut conn, workspace_id, caller).await?;
        info!("user {caller} left workspace {workspace_id}");

        Ok(MessageResponse::new("Left workspace successfully"))
    }
}

use api_data::model::*;
use api_data::{CommentId, ProjectId, Role, TaskId, TaskStatus, UserId, WorkspaceId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::transport::ApiRequest;

fn to_body(value: &impl Serialize) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::Encode)
}

fn project_path(workspace_id: WorkspaceId, project_id: ProjectId) -> String {
    format!("/workspaces/{workspace_id}/projects/{project_id}")
}

fn task_path(workspace_id: WorkspaceId, project_id: ProjectId, task_id: TaskId) -> String {
    format!("{}/tasks/{task_id}", project_path(workspace_id, project_id))
}

impl ApiClient {
    async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.execute(&request).await?.json()
    }

    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let body = RegisterRequest {
            email: Some(email.into()),
            name: Some(name.into()),
            password: Some(password.into()),
        };
        self.call(ApiRequest::post("/auth/register", to_body(&body)?).unauthenticated()).await
    }

    /// Log in and keep the issued tokens in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: Some(email.into()),
            password: Some(password.into()),
        };
        let response: LoginResponse = self
            .call(ApiRequest::post("/auth/login", to_body(&body)?).unauthenticated())
            .await?;
        self.session()
            .set_tokens(response.access_token.clone(), response.refresh_token.clone())
            .await?;
        Ok(response)
    }

    /// Close the server session. The local session is dropped either way.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let result = self.call(ApiRequest::post("/auth/logout", json!({}))).await;
        self.session().clear().await?;
        result
    }

    pub async fn me(&self) -> Result<MeResponse, ApiError> {
        self.call(ApiRequest::get("/auth/me")).await
    }

    pub async fn list_workspaces(&self) -> Result<WorkspaceListResponse, ApiError> {
        self.call(ApiRequest::get("/workspaces")).await
    }

    pub async fn create_workspace(&self, name: &str) -> Result<WorkspaceResponse, ApiError> {
        let body = CreateWorkspaceRequest { name: Some(name.into()) };
        self.call(ApiRequest::post("/workspaces", to_body(&body)?)).await
    }

    pub async fn rename_workspace(
        &self,
        workspace_id: WorkspaceId,
        name: &str,
    ) -> Result<WorkspaceResponse, ApiError> {
        let body = UpdateWorkspaceRequest { name: Some(name.into()) };
        self.call(ApiRequest::put(format!("/workspaces/{workspace_id}"), to_body(&body)?)).await
    }

    pub async fn delete_workspace(&self, workspace_id: WorkspaceId) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::delete(format!("/workspaces/{workspace_id}"))).await
    }

    pub async fn list_members(&self, workspace_id: WorkspaceId) -> Result<MemberListResponse, ApiError> {
        self.call(ApiRequest::get(format!("/workspaces/{workspace_id}/members"))).await
    }

    pub async fn add_member(
        &self,
        workspace_id: WorkspaceId,
        email: &str,
        role: Option<Role>,
    ) -> Result<MemberResponse, ApiError> {
        let body = AddMemberRequest { email: Some(email.into()), role };
        self.call(ApiRequest::post(format!("/workspaces/{workspace_id}/members"), to_body(&body)?)).await
    }

    pub async fn remove_member(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::delete(format!("/workspaces/{workspace_id}/members/{user_id}"))).await
    }

    pub async fn leave_workspace(&self, workspace_id: WorkspaceId) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::post(format!("/workspaces/{workspace_id}/leave"), json!({}))).await
    }

    pub async fn list_projects(&self, workspace_id: WorkspaceId) -> Result<ProjectListResponse, ApiError> {
        self.call(ApiRequest::get(format!("/workspaces/{workspace_id}/projects"))).await
    }

    pub async fn create_project(
        &self,
        workspace_id: WorkspaceId,
        request: &CreateProjectRequest,
    ) -> Result<ProjectResponse, ApiError> {
        self.call(ApiRequest::post(format!("/workspaces/{workspace_id}/projects"), to_body(request)?)).await
    }

    pub async fn update_project(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        request: &UpdateProjectRequest,
    ) -> Result<ProjectResponse, ApiError> {
        self.call(ApiRequest::put(project_path(workspace_id, project_id), to_body(request)?)).await
    }

    pub async fn delete_project(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::delete(project_path(workspace_id, project_id))).await
    }

    pub async fn list_tasks(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        status: Option<TaskStatus>,
    ) -> Result<TaskListResponse, ApiError> {
        let mut path = format!("{}/tasks", project_path(workspace_id, project_id));
        if let Some(status) = status {
            path.push_str(&format!("?status={status}"));
        }
        self.call(ApiRequest::get(path)).await
    }

    pub async fn create_task(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        request: &CreateTaskRequest,
    ) -> Result<TaskResponse, ApiError> {
        let path = format!("{}/tasks", project_path(workspace_id, project_id));
        self.call(ApiRequest::post(path, to_body(request)?)).await
    }

    pub async fn update_task(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
        request: &UpdateTaskRequest,
    ) -> Result<TaskResponse, ApiError> {
        self.call(ApiRequest::put(task_path(workspace_id, project_id, task_id), to_body(request)?)).await
    }

    pub async fn delete_task(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<MessageResponse, ApiError> {
        self.call(ApiRequest::delete(task_path(workspace_id, project_id, task_id))).await
    }

    pub async fn list_comments(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> Result<CommentListResponse, ApiError> {
        let path = format!("{}/comments", task_path(workspace_id, project_id, task_id));
        self.call(ApiRequest::get(path)).await
    }

    pub async fn add_comment(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
        content: &str,
    ) -> Result<CommentResponse, ApiError> {
        let path = format!("{}/comments", task_path(workspace_id, project_id, task_id));
        let body = CreateCommentRequest { content: Some(content.into()) };
        self.call(ApiRequest::post(path, to_body(&body)?)).await
    }

    pub async fn update_comment(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
        content: &str,
    ) -> Result<CommentResponse, ApiError> {
        let path = format!("{}/comments/{comment_id}", task_path(workspace_id, project_id, task_id));
        let body = UpdateCommentRequest { content: Some(content.into()) };
        self.call(ApiRequest::put(path, to_body(&body)?)).await
    }

    pub async fn delete_comment(
        &self,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        task_id: TaskId,
        comment_id: CommentId,
    ) -> Result<MessageResponse, ApiError> {
        let path = format!("{}/comments/{comment_id}", task_path(workspace_id, project_id, task_id));
        self.call(ApiRequest::delete(path)).await
    }
}

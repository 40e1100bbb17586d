use api_data::model::{CreateProjectRequest, MessageResponse, ProjectListResponse, ProjectResponse, UpdateProjectRequest};
use api_data::{ProjectId, WorkspaceId};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, routes, Route, State};
use taskboard::service::ProjectService;
use uuid::Uuid;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::ApiResult;

#[get("/<workspace_id>/projects")]
async fn list(
    projects: &State<ProjectService>,
    caller: Authenticated,
    workspace_id: Uuid,
) -> ApiResult<Json<ProjectListResponse>> {
    Ok(Json(projects.list(caller.user_id(), WorkspaceId(workspace_id)).await?))
}

#[post("/<workspace_id>/projects", data = "<request>")]
async fn create(
    projects: &State<ProjectService>,
    caller: Authenticated,
    workspace_id: Uuid,
    request: Json<CreateProjectRequest>,
) -> ApiResult<Custom<Json<ProjectResponse>>> {
    let response = projects
        .create(caller.user_id(), WorkspaceId(workspace_id), &request)
        .await?;
    Ok(Custom(Status::Created, Json(response)))
}

#[put("/<workspace_id>/projects/<project_id>", data = "<request>")]
async fn update(
    projects: &State<ProjectService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    request: Json<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let response = projects
        .update(caller.user_id(), WorkspaceId(workspace_id), ProjectId(project_id), &request)
        .await?;
    Ok(Json(response))
}

#[delete("/<workspace_id>/projects/<project_id>")]
async fn delete(
    projects: &State<ProjectService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    let response = projects
        .delete(caller.user_id(), WorkspaceId(workspace_id), ProjectId(project_id))
        .await?;
    Ok(Json(response))
}

pub fn project_routes() -> Vec<Route> {
    routes![
        list,
        create,
        update,
        delete,
    ]
}

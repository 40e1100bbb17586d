use api_data::model::{CreateWorkspaceRequest, MessageResponse, UpdateWorkspaceRequest, WorkspaceListResponse, WorkspaceResponse};
use api_data::WorkspaceId;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, routes, Route, State};
use taskboard::service::WorkspaceService;
use uuid::Uuid;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::ApiResult;

#[get("/")]
async fn list(
    workspaces: &State<WorkspaceService>,
    caller: Authenticated,
) -> ApiResult<Json<WorkspaceListResponse>> {
    Ok(Json(workspaces.list(caller.user_id()).await?))
}

#[post("/", data = "<request>")]
async fn create(
    workspaces: &State<WorkspaceService>,
    caller: Authenticated,
    request: Json<CreateWorkspaceRequest>,
) -> ApiResult<Custom<Json<WorkspaceResponse>>> {
    let response = workspaces.create(caller.user_id(), &request).await?;
    Ok(Custom(Status::Created, Json(response)))
}

#[put("/<workspace_id>", data = "<request>")]
async fn update(
    workspaces: &State<WorkspaceService>,
    caller: Authenticated,
    workspace_id: Uuid,
    request: Json<UpdateWorkspaceRequest>,
) -> ApiResult<Json<WorkspaceResponse>> {
    let response = workspaces
        .update(caller.user_id(), WorkspaceId(workspace_id), &request)
        .await?;
    Ok(Json(response))
}

#[delete("/<workspace_id>")]
async fn delete(
    workspaces: &State<WorkspaceService>,
    caller: Authenticated,
    workspace_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(workspaces.delete(caller.user_id(), WorkspaceId(workspace_id)).await?))
}

pub fn workspace_routes() -> Vec<Route> {
    routes![
        list,
        create,
        update,
        delete,
    ]
}

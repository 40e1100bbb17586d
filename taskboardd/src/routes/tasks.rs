use api_data::model::{CreateTaskRequest, MessageResponse, TaskListResponse, TaskResponse, UpdateTaskRequest};
use api_data::{ProjectId, TaskId, TaskStatus, WorkspaceId};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, routes, Route, State};
use taskboard::service::TaskService;
use uuid::Uuid;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::{ApiError, ApiResult};

#[get("/<workspace_id>/projects/<project_id>/tasks?<status>")]
async fn list(
    tasks: &State<TaskService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    status: Option<&str>,
) -> ApiResult<Json<TaskListResponse>> {
    let status = status
        .map(|s| s.parse::<TaskStatus>())
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let response = tasks
        .list(caller.user_id(), WorkspaceId(workspace_id), ProjectId(project_id), status)
        .await?;
    Ok(Json(response))
}

#[post("/<workspace_id>/projects/<project_id>/tasks", data = "<request>")]
async fn create(
    tasks: &State<TaskService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    request: Json<CreateTaskRequest>,
) -> ApiResult<Custom<Json<TaskResponse>>> {
    let response = tasks
        .create(caller.user_id(), WorkspaceId(workspace_id), ProjectId(project_id), &request)
        .await?;
    Ok(Custom(Status::Created, Json(response)))
}

#[put("/<workspace_id>/projects/<project_id>/tasks/<task_id>", data = "<request>")]
async fn update(
    tasks: &State<TaskService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
    request: Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let response = tasks
        .update(
            caller.user_id(),
            WorkspaceId(workspace_id),
            ProjectId(project_id),
            TaskId(task_id),
            &request,
        )
        .await?;
    Ok(Json(response))
}

#[delete("/<workspace_id>/projects/<project_id>/tasks/<task_id>")]
async fn delete(
    tasks: &State<TaskService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    let response = tasks
        .delete(
            caller.user_id(),
            WorkspaceId(workspace_id),
            ProjectId(project_id),
            TaskId(task_id),
        )
        .await?;
    Ok(Json(response))
}

pub fn task_routes() -> Vec<Route> {
    routes![
        list,
        create,
        update,
        delete,
    ]
}

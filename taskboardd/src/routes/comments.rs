use api_data::model::{CommentListResponse, CommentResponse, CreateCommentRequest, MessageResponse, UpdateCommentRequest};
use api_data::{CommentId, ProjectId, TaskId, WorkspaceId};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, routes, Route, State};
use taskboard::service::{CommentService, TaskPath};
use uuid::Uuid;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::ApiResult;

fn task_path(workspace_id: Uuid, project_id: Uuid, task_id: Uuid) -> TaskPath {
    TaskPath {
        workspace_id: WorkspaceId(workspace_id),
        project_id: ProjectId(project_id),
        task_id: TaskId(task_id),
    }
}

#[get("/<workspace_id>/projects/<project_id>/tasks/<task_id>/comments")]
async fn list(
    comments: &State<CommentService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
) -> ApiResult<Json<CommentListResponse>> {
    let path = task_path(workspace_id, project_id, task_id);
    Ok(Json(comments.list(caller.user_id(), path).await?))
}

#[post("/<workspace_id>/projects/<project_id>/tasks/<task_id>/comments", data = "<request>")]
async fn create(
    comments: &State<CommentService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
    request: Json<CreateCommentRequest>,
) -> ApiResult<Custom<Json<CommentResponse>>> {
    let path = task_path(workspace_id, project_id, task_id);
    let response = comments.create(caller.user_id(), path, &request).await?;
    Ok(Custom(Status::Created, Json(response)))
}

#[put("/<workspace_id>/projects/<project_id>/tasks/<task_id>/comments/<comment_id>", data = "<request>")]
async fn update(
    comments: &State<CommentService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
    comment_id: Uuid,
    request: Json<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let path = task_path(workspace_id, project_id, task_id);
    let response = comments
        .update(caller.user_id(), path, CommentId(comment_id), &request)
        .await?;
    Ok(Json(response))
}

#[delete("/<workspace_id>/projects/<project_id>/tasks/<task_id>/comments/<comment_id>")]
async fn delete(
    comments: &State<CommentService>,
    caller: Authenticated,
    workspace_id: Uuid,
    project_id: Uuid,
    task_id: Uuid,
    comment_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    let path = task_path(workspace_id, project_id, task_id);
    Ok(Json(comments.delete(caller.user_id(), path, CommentId(comment_id)).await?))
}

pub fn comment_routes() -> Vec<Route> {
    routes![
        list,
        create,
        update,
        delete,
    ]
}

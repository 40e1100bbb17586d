use api_data::model::{AddMemberRequest, MemberListResponse, MemberResponse, MessageResponse};
use api_data::{UserId, WorkspaceId};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{delete, get, post, routes, Route, State};
use taskboard::service::MemberService;
use uuid::Uuid;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::ApiResult;

#[get("/<workspace_id>/members")]
async fn list(
    members: &State<MemberService>,
    caller: Authenticated,
    workspace_id: Uuid,
) -> ApiResult<Json<MemberListResponse>> {
    Ok(Json(members.list(caller.user_id(), WorkspaceId(workspace_id)).await?))
}

#[post("/<workspace_id>/members", data = "<request>")]
async fn add(
    members: &State<MemberService>,
    caller: Authenticated,
    workspace_id: Uuid,
    request: Json<AddMemberRequest>,
) -> ApiResult<Custom<Json<MemberResponse>>> {
    let response = members
        .add(caller.user_id(), WorkspaceId(workspace_id), &request)
        .await?;
    Ok(Custom(Status::Created, Json(response)))
}

#[delete("/<workspace_id>/members/<user_id>")]
async fn remove(
    members: &State<MemberService>,
    caller: Authenticated,
    workspace_id: Uuid,
    user_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    let response = members
        .remove(caller.user_id(), WorkspaceId(workspace_id), UserId(user_id))
        .await?;
    Ok(Json(response))
}

#[post("/<workspace_id>/leave")]
async fn leave(
    members: &State<MemberService>,
    caller: Authenticated,
    workspace_id: Uuid,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(members.leave(caller.user_id(), WorkspaceId(workspace_id)).await?))
}

pub fn member_routes() -> Vec<Route> {
    routes![
        list,
        add,
        remove,
        leave,
    ]
}

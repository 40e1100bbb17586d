use rocket::http::Status;
use serde_json::{json, Value};
use test_utils::setup_basic_config_with_key;
use crate::common::{bearer, json_body, start_server, with_json, TestServer};

mod common;

async fn create_workspace(server: &TestServer, token: &str, name: &str) -> String {
    let response = with_json(
        server.client.post("/workspaces").header(bearer(token)),
        json!({ "name": name }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Created);
    id_of(&json_body(response).await["workspace"])
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().expect("no id").to_owned()
}

#[tokio::test]
async fn workspace_membership_flow() {
    let server = start_server(setup_basic_config_with_key()).await;
    let owner = server.register_and_login("Owner").await;
    let member = server.register_and_login("Member").await;
    let ws = create_workspace(&server, &owner.access_token, "Board").await;

    let response = server.client.get("/workspaces")
        .header(bearer(&member.access_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["workspaces"], json!([]));

    let response = with_json(
        server.client.post(format!("/workspaces/{ws}/members")).header(bearer(&owner.access_token)),
        json!({ "email": "member@example.com" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Created);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Member added successfully");
    assert_eq!(body["member"]["role"], "MEMBER");

    let response = server.client.get("/workspaces")
        .header(bearer(&member.access_token))
        .dispatch()
        .await;
    let body = json_body(response).await;
    assert_eq!(body["workspaces"][0]["id"], ws);
    assert_eq!(body["workspaces"][0]["role"], "MEMBER");

    let response = with_json(
        server.client.put(format!("/workspaces/{ws}")).header(bearer(&member.access_token)),
        json!({ "name": "Hijacked" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(
        json_body(response).await["error"],
        "You do not have permission to update this workspace",
    );

    let response = server.client.delete(format!("/workspaces/{ws}"))
        .header(bearer(&member.access_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(
        json_body(response).await["error"],
        "Only the workspace owner can delete the workspace",
    );

    let response = server.client.post(format!("/workspaces/{ws}/leave"))
        .header(bearer(&member.access_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = server.client.delete(format!("/workspaces/{ws}"))
        .header(bearer(&owner.access_token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["message"], "Workspace deleted successfully");
}

#[tokio::test]
async fn workspace_name_is_required() {
    let server = start_server(setup_basic_config_with_key()).await;
    let owner = server.register_and_login("Owner").await;
    let response = with_json(
        server.client.post("/workspaces").header(bearer(&owner.access_token)),
        json!({ "name": "   " }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error"], "Workspace name is required");
}

#[tokio::test]
async fn project_task_comment_flow() {
    let server = start_server(setup_basic_config_with_key()).await;
    let owner = server.register_and_login("Owner").await;
    let token = owner.access_token.as_str();
    let ws = create_workspace(&server, token, "Board").await;

    let response = with_json(
        server.client.post(format!("/workspaces/{ws}/projects")).header(bearer(token)),
        json!({ "name": "Roadmap", "description": "Next quarter" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Created);
    let project = id_of(&json_body(response).await["project"]);
    let tasks_url = format!("/workspaces/{ws}/projects/{project}/tasks");

    let response = with_json(
        server.client.post(tasks_url.clone()).header(bearer(token)),
        json!({ "title": "Write docs", "priority": "HIGH" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Created);
    let body = json_body(response).await;
    assert_eq!(body["task"]["status"], "TODO");
    assert_eq!(body["task"]["priority"], "HIGH");
    assert_eq!(body["task"]["createdBy"], owner.user_id.to_string());
    let task = id_of(&body["task"]);

    let response = with_json(
        server.client.put(format!("{tasks_url}/{task}")).header(bearer(token)),
        json!({ "status": "DONE" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["task"]["title"], "Write docs");

    let response = server.client.get(format!("{tasks_url}?status=done"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["tasks"].as_array().map(Vec::len), Some(1));

    let response = server.client.get(format!("{tasks_url}?status=TODO"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(json_body(response).await["tasks"], json!([]));

    let response = server.client.get(format!("{tasks_url}?status=LATER"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let comments_url = format!("{tasks_url}/{task}/comments");
    let response = with_json(
        server.client.post(comments_url.clone()).header(bearer(token)),
        json!({ "content": "Done and dusted" }),
    ).dispatch().await;
    assert_eq!(response.status(), Status::Created);
    let body = json_body(response).await;
    assert_eq!(body["comment"]["authorName"], "Owner");
    let comment = id_of(&body["comment"]);

    let response = server.client.get(comments_url.clone())
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(json_body(response).await["comments"][0]["content"], "Done and dusted");

    let response = server.client.delete(format!("{comments_url}/{comment}"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let response = server.client.delete(format!("/workspaces/{ws}/projects/{project}"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["message"], "Project deleted successfully");
}

#[tokio::test]
async fn project_from_another_workspace_is_not_found() {
    let server = start_server(setup_basic_config_with_key()).await;
    let owner = server.register_and_login("Owner").await;
    let token = owner.access_token.as_str();
    let first = create_workspace(&server, token, "First").await;
    let second = create_workspace(&server, token, "Second").await;

    let response = with_json(
        server.client.post(format!("/workspaces/{second}/projects")).header(bearer(token)),
        json!({ "name": "Elsewhere" }),
    ).dispatch().await;
    let project = id_of(&json_body(response).await["project"]);

    let response = server.client.get(format!("/workspaces/{first}/projects/{project}/tasks"))
        .header(bearer(token))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error"], "Project not found in this workspace");
}

use rocket::error::ErrorKind;
use rocket::local::asynchronous::Client;
use taskboardd::build_rocket;
use test_utils::{setup_basic_config, setup_basic_config_with_key};
use crate::common::test_figment;

mod common;

#[tokio::test]
async fn ignites_with_key() {
    let dir = setup_basic_config_with_key();
    Client::tracked(build_rocket(test_figment(&dir))).await
        .expect("ignition failed");
}

#[tokio::test]
async fn missing_jwt_key_aborts_ignition() {
    let dir = setup_basic_config();
    let err = Client::tracked(build_rocket(test_figment(&dir))).await
        .err()
        .expect("ignited without a jwt key");
    assert!(matches!(err.kind(), ErrorKind::FailedFairings(_)), "wrong error type: {err:#?}");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let dir = setup_basic_config_with_key();
    let server = common::start_server(dir).await;
    let response = server.client.get("/nowhere").dispatch().await;
    assert_eq!(response.status(), rocket::http::Status::NotFound);
    let body = common::json_body(response).await;
    assert_eq!(body["error"], "Not found");
}

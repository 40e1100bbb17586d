#![allow(dead_code)]

use assert_fs::TempDir;
use api_data::model::{LoginResponse, RegisterResponse};
use api_data::UserId;
use figment::Figment;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::{Client, LocalRequest, LocalResponse};
use serde_json::{json, Value};
use taskboard::config::figment::FigmentExt;
use taskboardd::build_rocket;
use test_utils::data::{mock_email, MOCK_PASSWORD};
use test_utils::config_file_path;

pub struct TestServer {
    pub client: Client,
    _dir: TempDir,
}

pub fn test_figment(dir: &TempDir) -> Figment {
    Figment::from(rocket::Config::debug_default())
        .setup_app_config(config_file_path(dir))
}

pub async fn start_server(dir: TempDir) -> TestServer {
    let client = Client::tracked(build_rocket(test_figment(&dir)))
        .await
        .expect("rocket failed to ignite");
    TestServer { client, _dir: dir }
}

pub struct LoggedIn {
    pub user_id: UserId,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestServer {
    pub async fn register(&self, name: &str) -> UserId {
        let response = self.client.post("/auth/register")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": mock_email(name),
                    "name": name,
                    "password": MOCK_PASSWORD,
                }).to_string()
            )
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Created);
        response.into_json::<RegisterResponse>().await
            .expect("bad register response")
            .user
            .id
    }

    pub async fn login(&self, name: &str) -> LoggedIn {
        let response = self.client.post("/auth/login")
            .header(ContentType::JSON)
            .body(json!({ "email": mock_email(name), "password": MOCK_PASSWORD }).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<LoginResponse>().await
            .expect("bad login response");
        LoggedIn {
            user_id: body.user.id,
            access_token: body.access_token,
            refresh_token: body.refresh_token,
        }
    }

    pub async fn register_and_login(&self, name: &str) -> LoggedIn {
        self.register(name).await;
        self.login(name).await
    }
}

pub fn bearer(token: &str) -> Header<'static> {
    Header::new("Authorization", format!("Bearer {token}"))
}

pub fn with_json<'c>(request: LocalRequest<'c>, body: Value) -> LocalRequest<'c> {
    request.header(ContentType::JSON).body(body.to_string())
}

pub async fn json_body(response: LocalResponse<'_>) -> Value {
    response.into_json::<Value>().await.expect("response is not json")
}

use api_data::model::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse};
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Route, State};
use taskboard::auth::ProductionAuthService;
use crate::routes::authentication_guard::Authenticated;
use crate::routes::errors::{ApiError, ApiResult};

#[post("/register", data = "<request>")]
async fn register(
    auth: &State<ProductionAuthService>,
    request: Json<RegisterRequest>,
) -> ApiResult<Custom<Json<RegisterResponse>>> {
    let user = auth.register(&request).await?;
    Ok(
        Custom(
            Status::Created,
            Json(
                RegisterResponse {
                    message: "User registered successfully".into(),
                    user: user.into(),
                }
            ),
        )
    )
}

#[post("/login", data = "<request>")]
async fn login(
    auth: &State<ProductionAuthService>,
    request: Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let result = auth.login(&request).await?;
    Ok(
        Json(
            LoginResponse {
                message: "Login successful".into(),
                user: result.user.into(),
                access_token: result.access_token,
                refresh_token: result.refresh_token,
            }
        )
    )
}

#[post("/refresh", data = "<request>")]
async fn refresh(
    auth: &State<ProductionAuthService>,
    request: Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let Some(refresh_token) = request.refresh_token.as_deref() else {
        return Err(ApiError::bad_request("Refresh token is required"));
    };
    let access_token = auth.refresh(refresh_token).await?;
    Ok(Json(RefreshResponse { access_token }))
}

#[post("/logout")]
async fn logout(
    auth: &State<ProductionAuthService>,
    caller: Authenticated,
) -> ApiResult<Json<MessageResponse>> {
    auth.logout(caller.session_id()).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

#[get("/me")]
async fn me(
    auth: &State<ProductionAuthService>,
    caller: Authenticated,
) -> ApiResult<Json<MeResponse>> {
    let user = auth.me(caller.user_id()).await?;
    Ok(Json(MeResponse { user: user.into() }))
}

pub fn auth_routes() -> Vec<Route> {
    routes![
        register,
        login,
        refresh,
        logout,
        me,
    ]
}

use api_data::model::ErrorResponse;
use rocket::serde::json::Json;
use rocket::{catch, catchers, Catcher, Request};
use crate::http::header::UnauthorizedResponse;
use crate::http::status::Unauthorized;

#[catch(400)]
fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Malformed request"))
}

#[catch(401)]
fn unauthorized(request: &Request) -> UnauthorizedResponse {
    let reason = request.local_cache(|| Unauthorized::MissingToken);
    UnauthorizedResponse::new(reason.message())
}

#[catch(404)]
fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not found"))
}

#[catch(422)]
fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request"))
}

#[catch(500)]
fn internal() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("internal server error"))
}

pub fn api_catchers() -> Vec<Catcher> {
    catchers![
        bad_request,
        unauthorized,
        not_found,
        unprocessable,
        internal,
    ]
}

use api_data::model::ErrorResponse;
use log::error;
use rocket::serde::json::Json;
use rocket::Responder;
use taskboard::auth::AuthError;
use taskboard::service::ServiceError;
use crate::http::header::UnauthorizedResponse;
use crate::http::status::Unauthorized;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Every failure a route can produce, rendered as `{ "error": ... }`.
#[derive(Responder)]
pub enum ApiError {
    #[response(status = 400)]
    BadRequest(Json<ErrorResponse>),

    Unauthorized(UnauthorizedResponse),

    #[response(status = 500)]
    Internal(Json<ErrorResponse>),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(Json(ErrorResponse::new(message)))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(UnauthorizedResponse::new(message))
    }

    pub fn internal() -> Self {
        ApiError::Internal(Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)))
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(message)
            | ServiceError::Permission(message)
            | ServiceError::NotFound(message)
            => ApiError::bad_request(message),

            ServiceError::Internal(_) => ApiError::internal(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Validation(message) => ApiError::bad_request(message),

            AuthError::InvalidCredentials | AuthError::InvalidRefreshToken
            => ApiError::unauthorized(value.to_string()),

            AuthError::HeaderFormat | AuthError::InvalidToken
            => ApiError::unauthorized(Unauthorized::InvalidToken.message()),

            AuthError::Db(_) | AuthError::Hasher(_) | AuthError::AccessTokenGenerator(_) => {
                error!("auth failure: {value}");
                ApiError::internal()
            },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

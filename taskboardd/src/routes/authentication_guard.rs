use api_data::UserId;
use async_trait::async_trait;
use log::error;
use rocket::http::Status;
use rocket::outcome::try_outcome;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use taskboard::auth::{AuthError, KnownSession, ProductionAuthService, SessionInfo};
use taskboard::data::SessionId;
use crate::http::status::Unauthorized;

const AUTHORIZATION: &str = "Authorization";

/// A caller holding a valid access token for a live session.
#[derive(Debug)]
pub struct Authenticated(KnownSession);

impl Authenticated {
    pub fn user_id(&self) -> UserId {
        self.0.user_id
    }

    pub fn session_id(&self) -> SessionId {
        self.0.session_id
    }
}

#[derive(Debug)]
pub enum MaybeAuthenticated {
    Valid(KnownSession),
    Expired(KnownSession),
    Invalid,
    Unauthenticated,
}

#[derive(Debug)]
pub enum GuardError {
    Unauthorized(Unauthorized),
    Internal,
}

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = GuardError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let reason = match try_outcome!(request.guard::<MaybeAuthenticated>().await) {
            MaybeAuthenticated::Valid(session) => return Outcome::Success(Authenticated(session)),
            MaybeAuthenticated::Expired(_) => Unauthorized::ExpiredToken,
            MaybeAuthenticated::Invalid => Unauthorized::InvalidToken,
            MaybeAuthenticated::Unauthenticated => Unauthorized::MissingToken,
        };
        // picked up by the 401 catcher
        request.local_cache(|| reason);
        Outcome::Error((Status::Unauthorized, GuardError::Unauthorized(reason)))
    }
}

#[async_trait]
impl<'r> FromRequest<'r> for MaybeAuthenticated {
    type Error = GuardError;

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let Some(auth_header) = request.headers().get_one(AUTHORIZATION) else {
            return Outcome::Success(MaybeAuthenticated::Unauthenticated);
        };
        let auth_service = match request.guard::<&State<ProductionAuthService>>().await {
            Outcome::Success(service) => service,
            _ => {
                error!("auth service is not set up");
                return Outcome::Error((Status::InternalServerError, GuardError::Internal));
            },
        };
        match auth_service.check_user_access(auth_header).await {
            Ok(SessionInfo::Valid(session)) => Outcome::Success(MaybeAuthenticated::Valid(session)),
            Ok(SessionInfo::Expired(session)) => Outcome::Success(MaybeAuthenticated::Expired(session)),
            Err(e) => match e {
                AuthError::HeaderFormat |
                AuthError::InvalidToken |
                AuthError::InvalidCredentials |
                AuthError::InvalidRefreshToken
                => Outcome::Success(MaybeAuthenticated::Invalid),

                AuthError::Validation(_) |
                AuthError::Db(_) |
                AuthError::Hasher(_) |
                AuthError::AccessTokenGenerator(_)
                => {
                    error!("access check failed: {e}");
                    Outcome::Error((Status::InternalServerError, GuardError::Internal))
                },
            }
        }
    }
}

pub mod header {
    use api_data::model::ErrorResponse;
    use rocket::http::Header;
    use rocket::serde::json::Json;
    use rocket::Responder;

    pub const AUTH_REALM: &str = "taskboard";

    pub struct WwwAuthenticate;

    impl From<WwwAuthenticate> for Header<'static> {
        fn from(_: WwwAuthenticate) -> Self {
            Header::new(
                "WWW-Authenticate",
                format!("Bearer realm=\"{AUTH_REALM}\" error=\"invalid_token\""),
            )
        }
    }

    #[derive(Responder)]
    #[response(status = 401)]
    pub struct UnauthorizedResponse {
        body: Json<ErrorResponse>,
        www_authenticate: WwwAuthenticate,
    }

    impl UnauthorizedResponse {
        pub fn new(message: impl Into<String>) -> Self {
            UnauthorizedResponse {
                body: Json(ErrorResponse::new(message)),
                www_authenticate: WwwAuthenticate,
            }
        }
    }
}

pub mod status {
    /// Why a request failed authentication.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Unauthorized {
        MissingToken,
        InvalidToken,
        ExpiredToken,
    }

    impl Unauthorized {
        pub fn message(&self) -> &'static str {
            match self {
                Unauthorized::MissingToken => "Authentication required",
                Unauthorized::InvalidToken => "Invalid access token",
                Unauthorized::ExpiredToken => "Access token expired",
            }
        }
    }
}

use std::io;
use thiserror::Error;
use crate::transport::ApiResponse;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network failure: {0}")]
    Network(String),

    #[error("failed to set up the http client")]
    Setup(#[source] reqwest::Error),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session file io failed")]
    Io(#[from] io::Error),

    #[error("session file is malformed")]
    Parse(#[from] toml::de::Error),

    #[error("session serialization failed")]
    Serialization(#[from] toml::ser::Error),
}

/// A request that finally failed. The display string is meant for users.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out. Please check your connection and try again.")]
    Timeout,

    #[error("Network error. Please check your internet connection.")]
    Network,

    #[error("Server error. Please try again later.")]
    Server { status: u16 },

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    #[error("unexpected response from the server: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode the request body")]
    Encode(#[source] serde_json::Error),

    #[error("failed to set up the http client")]
    Setup(#[source] reqwest::Error),

    #[error(transparent)]
    SessionStore(#[from] SessionStoreError),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status } | ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Turn a failed response into an error, preferring the server's own
    /// message unless the server itself failed.
    pub fn from_response(response: &ApiResponse) -> Self {
        if response.status >= 500 {
            return ApiError::Server { status: response.status };
        }
        let message = response.body.as_ref()
            .and_then(|body| {
                ["error", "message"].into_iter()
                    .find_map(|field| body.get(field)?.as_str())
            })
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Request failed with status {}", response.status));
        ApiError::Rejected {
            status: response.status,
            message,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Timeout => ApiError::Timeout,
            TransportError::Network(_) => ApiError::Network,
            TransportError::Setup(e) => ApiError::Setup(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::*;

    fn response(status: u16, body: Option<serde_json::Value>) -> ApiResponse {
        ApiResponse { status, body }
    }

    #[test]
    fn server_errors_hide_the_body() {
        let err = ApiError::from_response(&response(503, Some(json!({ "error": "db down" }))));
        assert_eq!(err.to_string(), "Server error. Please try again later.");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn body_error_then_message() {
        let err = ApiError::from_response(&response(400, Some(json!({ "error": "Task title is required" }))));
        assert_eq!(err.to_string(), "Task title is required");

        let err = ApiError::from_response(&response(403, Some(json!({ "message": "Forbidden" }))));
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn generic_message_without_body() {
        let err = ApiError::from_response(&response(404, None));
        assert_eq!(err.to_string(), "Request failed with status 404");
    }

    #[test]
    fn transport_errors_get_user_messages() {
        assert_eq!(
            ApiError::from(TransportError::Timeout).to_string(),
            "Request timed out. Please check your connection and try again.",
        );
        assert_eq!(
            ApiError::from(TransportError::Network("refused".into())).to_string(),
            "Network error. Please check your internet connection.",
        );
    }
}

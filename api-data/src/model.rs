mod auth;
mod comments;
mod members;
mod projects;
mod tasks;
mod workspaces;

use serde::{Deserialize, Serialize};

pub use auth::*;
pub use comments::*;
pub use members::*;
pub use projects::*;
pub use tasks::*;
pub use workspaces::*;

/// Body of a successful mutation that returns no resource.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse { message: message.into() }
    }
}

/// Body of every failed request.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse { error: error.into() }
    }
}

//! Workspace-scoped resources behind membership checks.
//!
//! Every operation first validates its input, then checks the caller's
//! role in the workspace, then resolves the target inside its parent
//! scope. A caller who is not a member of the workspace gets a permission
//! error even when the workspace does not exist, so workspace ids cannot
//! be probed.

mod access;
mod errors;
mod validation;
mod comments;
mod members;
mod projects;
mod tasks;
mod workspaces;
#[cfg(test)] mod tests;

use crate::config::app_config::AppConfig;

pub use comments::{CommentService, TaskPath};
pub use errors::ServiceError;
pub use members::MemberService;
pub use projects::ProjectService;
pub use tasks::TaskService;
pub use workspaces::WorkspaceService;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Limits {
    /// Names and titles, in characters.
    pub max_name_len: usize,
    /// Descriptions and comments, in characters.
    pub max_text_len: usize,
}

impl From<&AppConfig> for Limits {
    fn from(value: &AppConfig) -> Self {
        Limits {
            max_name_len: value.max_name_len,
            max_text_len: value.max_text_len,
        }
    }
}

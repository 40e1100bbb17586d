//! JSON vocabulary of the taskboard REST API, shared by the server and
//! the client.
//!
//! Field names are camelCase on the wire. Enumerations are
//! SCREAMING_SNAKE_CASE. With the `sqlx` feature the identifiers and
//! enumerations can be stored directly in the database.

pub mod ids;
pub mod kinds;
pub mod model;

pub use ids::{CommentId, ProjectId, TaskId, UserId, WorkspaceId};
pub use kinds::{KindParseError, Role, TaskPriority, TaskStatus};

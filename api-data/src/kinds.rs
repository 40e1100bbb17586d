use std::fmt::{Display, Formatter};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a user inside a workspace.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl Role {
    /// Owners and admins manage the workspace and its projects.
    pub fn can_manage(self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }

    pub fn is_owner(self) -> bool {
        self == Role::Owner
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Error)]
#[error("unknown {kind} \"{value}\"")]
pub struct KindParseError {
    kind: &'static str,
    value: String,
}

macro_rules! wire_names {
    ($type:ty, $kind:literal, $($variant:path => $name:literal),+ $(,)?) => {
        impl $type {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($variant => $name,)+
                }
            }
        }

        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $type {
            type Err = KindParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($name => Ok($variant),)+
                    _ => Err(KindParseError { kind: $kind, value: s.to_owned() }),
                }
            }
        }
    };
}

wire_names!(
    Role, "role",
    Role::Owner => "OWNER",
    Role::Admin => "ADMIN",
    Role::Member => "MEMBER",
);

wire_names!(
    TaskStatus, "task status",
    TaskStatus::Todo => "TODO",
    TaskStatus::InProgress => "IN_PROGRESS",
    TaskStatus::Done => "DONE",
);

wire_names!(
    TaskPriority, "task priority",
    TaskPriority::Low => "LOW",
    TaskPriority::Medium => "MEDIUM",
    TaskPriority::High => "HIGH",
);

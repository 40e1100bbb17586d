use std::path::PathBuf;
use api_data::{CommentId, ProjectId, Role, TaskId, TaskPriority, TaskStatus, UserId, WorkspaceId};
use clap::{Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(version, author, about)]
pub struct CliConfig {
    /// Client configuration file; `TASKBOARD_CLIENT_*` variables override it.
    #[arg(long)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an account; the password is prompted for.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        email: String,
    },
    Logout,
    /// Show the logged-in user.
    Me,
    #[command(subcommand)]
    Workspaces(WorkspaceCommand),
    #[command(subcommand)]
    Members(MemberCommand),
    #[command(subcommand)]
    Projects(ProjectCommand),
    #[command(subcommand)]
    Tasks(TaskCommand),
    #[command(subcommand)]
    Comments(CommentCommand),
}

#[derive(Clone, Debug, Subcommand)]
pub enum WorkspaceCommand {
    List,
    Create { name: String },
    Rename { workspace: WorkspaceId, name: String },
    Delete { workspace: WorkspaceId },
    Leave { workspace: WorkspaceId },
}

#[derive(Clone, Debug, Subcommand)]
pub enum MemberCommand {
    List { workspace: WorkspaceId },
    Add {
        workspace: WorkspaceId,
        email: String,
        #[arg(long)]
        role: Option<Role>,
    },
    Remove { workspace: WorkspaceId, user: UserId },
}

#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommand {
    List { workspace: WorkspaceId },
    Create {
        workspace: WorkspaceId,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    Rename { workspace: WorkspaceId, project: ProjectId, name: String },
    Delete { workspace: WorkspaceId, project: ProjectId },
}

#[derive(Clone, Debug, Args)]
pub struct ProjectRef {
    pub workspace: WorkspaceId,
    pub project: ProjectId,
}

#[derive(Clone, Debug, Args)]
pub struct TaskRef {
    pub workspace: WorkspaceId,
    pub project: ProjectId,
    pub task: TaskId,
}

#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommand {
    List {
        #[command(flatten)]
        project: ProjectRef,
        #[arg(long)]
        status: Option<TaskStatus>,
    },
    Create {
        #[command(flatten)]
        project: ProjectRef,
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    Update {
        #[command(flatten)]
        task: TaskRef,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    Delete {
        #[command(flatten)]
        task: TaskRef,
    },
}

#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommand {
    List {
        #[command(flatten)]
        task: TaskRef,
    },
    Add {
        #[command(flatten)]
        task: TaskRef,
        content: String,
    },
    Delete {
        #[command(flatten)]
        task: TaskRef,
        comment: CommentId,
    },
}

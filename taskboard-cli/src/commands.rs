use api_data::model::{CreateProjectRequest, CreateTaskRequest, UpdateProjectRequest, UpdateTaskRequest};
use log::warn;
use rpassword::prompt_password;
use taskboard_client::{ApiClient, ApiError};
use thiserror::Error;
use crate::cli::{Command, CommentCommand, MemberCommand, ProjectCommand, TaskCommand, WorkspaceCommand};
use crate::output;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("could not read password: {0}")]
    PasswordInput(#[from] std::io::Error),

    #[error("entered password is empty")]
    EmptyPassword,

    #[error("the passwords do not match")]
    PasswordMismatch,

    #[error("nothing to update")]
    NothingToUpdate,
}

/// Run one command and return the text to print.
pub async fn run(client: &ApiClient, command: Command) -> Result<String, CommandError> {
    match command {
        Command::Register { email, name } => {
            let password = read_password(true)?;
            let response = client.register(&email, &name, &password).await?;
            Ok(format!("{}: {}", response.message, output::user(&response.user)))
        }
        Command::Login { email } => {
            let password = read_password(false)?;
            let response = client.login(&email, &password).await?;
            Ok(format!("{}: {}", response.message, output::user(&response.user)))
        }
        Command::Logout => Ok(client.logout().await?.message),
        Command::Me => Ok(output::user(&client.me().await?.user)),
        Command::Workspaces(command) => workspaces(client, command).await,
        Command::Members(command) => members(client, command).await,
        Command::Projects(command) => projects(client, command).await,
        Command::Tasks(command) => tasks(client, command).await,
        Command::Comments(command) => comments(client, command).await,
    }
}

async fn workspaces(client: &ApiClient, command: WorkspaceCommand) -> Result<String, CommandError> {
    Ok(match command {
        WorkspaceCommand::List => output::workspaces(&client.list_workspaces().await?.workspaces),
        WorkspaceCommand::Create { name } => {
            let response = client.create_workspace(&name).await?;
            format!("{}: {}", response.message, response.workspace.id)
        }
        WorkspaceCommand::Rename { workspace, name } => {
            client.rename_workspace(workspace, &name).await?.message
        }
        WorkspaceCommand::Delete { workspace } => client.delete_workspace(workspace).await?.message,
        WorkspaceCommand::Leave { workspace } => client.leave_workspace(workspace).await?.message,
    })
}

async fn members(client: &ApiClient, command: MemberCommand) -> Result<String, CommandError> {
    Ok(match command {
        MemberCommand::List { workspace } => {
            output::members(&client.list_members(workspace).await?.members)
        }
        MemberCommand::Add { workspace, email, role } => {
            let response = client.add_member(workspace, &email, role).await?;
            format!("{}: {}", response.message, response.member.user_id)
        }
        MemberCommand::Remove { workspace, user } => {
            client.remove_member(workspace, user).await?.message
        }
    })
}

async fn projects(client: &ApiClient, command: ProjectCommand) -> Result<String, CommandError> {
    Ok(match command {
        ProjectCommand::List { workspace } => {
            output::projects(&client.list_projects(workspace).await?.projects)
        }
        ProjectCommand::Create { workspace, name, description } => {
            let request = CreateProjectRequest { name: Some(name), description };
            let response = client.create_project(workspace, &request).await?;
            format!("{}: {}", response.message, response.project.id)
        }
        ProjectCommand::Rename { workspace, project, name } => {
            let request = UpdateProjectRequest { name: Some(name), description: None };
            client.update_project(workspace, project, &request).await?.message
        }
        ProjectCommand::Delete { workspace, project } => {
            client.delete_project(workspace, project).await?.message
        }
    })
}

async fn tasks(client: &ApiClient, command: TaskCommand) -> Result<String, CommandError> {
    Ok(match command {
        TaskCommand::List { project, status } => {
            let listed = client.list_tasks(project.workspace, project.project, status).await?;
            output::tasks(&listed.tasks)
        }
        TaskCommand::Create { project, title, description, status, priority } => {
            let request = CreateTaskRequest { title: Some(title), description, status, priority };
            let response = client.create_task(project.workspace, project.project, &request).await?;
            format!("{}: {}", response.message, response.task.id)
        }
        TaskCommand::Update { task, title, description, status, priority } => {
            let request = UpdateTaskRequest { title, description, status, priority };
            if request == UpdateTaskRequest::default() {
                return Err(CommandError::NothingToUpdate);
            }
            client.update_task(task.workspace, task.project, task.task, &request).await?.message
        }
        TaskCommand::Delete { task } => {
            client.delete_task(task.workspace, task.project, task.task).await?.message
        }
    })
}

async fn comments(client: &ApiClient, command: CommentCommand) -> Result<String, CommandError> {
    Ok(match command {
        CommentCommand::List { task } => {
            let listed = client.list_comments(task.workspace, task.project, task.task).await?;
            output::comments(&listed.comments)
        }
        CommentCommand::Add { task, content } => {
            let response = client
                .add_comment(task.workspace, task.project, task.task, &content)
                .await?;
            format!("{}: {}", response.message, response.comment.id)
        }
        CommentCommand::Delete { task, comment } => {
            client
                .delete_comment(task.workspace, task.project, task.task, comment)
                .await?
                .message
        }
    })
}

fn read_password(repeat: bool) -> Result<String, CommandError> {
    let password = prompt_password("Password: ")?;
    if password.is_empty() {
        return Err(CommandError::EmptyPassword);
    }
    if repeat {
        let confirmation = prompt_password("Repeat the password: ")?;
        if confirmation != password {
            return Err(CommandError::PasswordMismatch);
        }
        if password.trim() != password {
            warn!("the password has leading or trailing whitespace characters");
        }
    }
    Ok(password)
}

use std::fmt::Write;
use api_data::model::{CommentView, MemberView, ProjectView, TaskView, UserView, WorkspaceView};

pub fn user(user: &UserView) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.id)
}

pub fn workspaces(workspaces: &[WorkspaceView]) -> String {
    table(workspaces, "no workspaces", |out, workspace| {
        write!(out, "{}  {}", workspace.id, workspace.name)?;
        if let Some(role) = workspace.role {
            write!(out, "  [{role}]")?;
        }
        Ok(())
    })
}

pub fn members(members: &[MemberView]) -> String {
    table(members, "no members", |out, member| {
        write!(out, "{}  {} <{}>  [{}]", member.user_id, member.name, member.email, member.role)
    })
}

pub fn projects(projects: &[ProjectView]) -> String {
    table(projects, "no projects", |out, project| {
        write!(out, "{}  {}", project.id, project.name)?;
        if let Some(description) = &project.description {
            write!(out, "  - {description}")?;
        }
        Ok(())
    })
}

pub fn tasks(tasks: &[TaskView]) -> String {
    table(tasks, "no tasks", |out, task| {
        write!(out, "{}  [{}/{}]  {}", task.id, task.status, task.priority, task.title)
    })
}

pub fn comments(comments: &[CommentView]) -> String {
    table(comments, "no comments", |out, comment| {
        write!(out, "{}  {}: {}", comment.id, comment.author_name, comment.content)
    })
}

fn table<T>(
    items: &[T],
    empty: &str,
    mut line: impl FnMut(&mut String, &T) -> std::fmt::Result,
) -> String {
    if items.is_empty() {
        return format!("({empty})");
    }
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // writing into a String cannot fail
        let _ = line(&mut out, item);
    }
    out
}

use api_data::model::*;
use api_data::{CommentId, ProjectId, Role, TaskId, TaskPriority, TaskStatus, UserId, WorkspaceId};
use crate::db::DbPool;
use crate::test::{make_user, test_db, test_limits};
use super::*;

struct Fixture {
    db: DbPool,
    workspaces: WorkspaceService,
    members: MemberService,
    projects: ProjectService,
    tasks: TaskService,
    comments: CommentService,
    owner: UserId,
}

impl Fixture {
    async fn new() -> Self {
        let db = test_db().await;
        let owner = make_user(&db, "Owner").await;
        Fixture {
            workspaces: WorkspaceService::new(db.clone(), test_limits()),
            members: MemberService::new(db.clone()),
            projects: ProjectService::new(db.clone(), test_limits()),
            tasks: TaskService::new(db.clone(), test_limits()),
            comments: CommentService::new(db.clone(), test_limits()),
            db,
            owner,
        }
    }

    async fn count<T>(&self, query: &str, id: T) -> i64
    where
        T: for<'q> sqlx::Encode<'q, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite> + Send,
    {
        sqlx::query_scalar::<_, i64>(query)
            .bind(id)
            .fetch_one(self.db.inner())
            .await
            .expect("count query failed")
    }

    async fn workspace(&self) -> WorkspaceId {
        self.workspaces
            .create(self.owner, &CreateWorkspaceRequest { name: Some("Board".into()) })
            .await
            .expect("workspace creation failed")
            .workspace
            .id
    }

    async fn member(&self, workspace_id: WorkspaceId, name: &str, role: Role) -> UserId {
        let user = make_user(&self.db, name).await;
        self.members
            .add(
                self.owner,
                workspace_id,
                &AddMemberRequest {
                    email: Some(format!("{}@example.com", name.to_lowercase())),
                    role: Some(role),
                },
            )
            .await
            .expect("adding member failed");
        user
    }

    async fn project(&self, workspace_id: WorkspaceId) -> ProjectId {
        self.projects
            .create(
                self.owner,
                workspace_id,
                &CreateProjectRequest { name: Some("Roadmap".into()), description: None },
            )
            .await
            .expect("project creation failed")
            .project
            .id
    }

    async fn task(
        &self,
        caller: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        title: &str,
    ) -> TaskId {
        self.tasks
            .create(
                caller,
                workspace_id,
                project_id,
                &CreateTaskRequest { title: Some(title.into()), ..Default::default() },
            )
            .await
            .expect("task creation failed")
            .task
            .id
    }

    async fn comment(&self, caller: UserId, path: TaskPath, content: &str) -> CommentId {
        self.comments
            .create(caller, path, &CreateCommentRequest { content: Some(content.into()) })
            .await
            .expect("comment creation failed")
            .comment
            .id
    }
}

fn assert_validation(err: ServiceError, message: &str) {
    assert!(matches!(err, ServiceError::Validation(ref m) if m == message), "wrong error: {err:#?}");
}

fn assert_permission(err: ServiceError, message: &str) {
    assert!(matches!(err, ServiceError::Permission(ref m) if m == message), "wrong error: {err:#?}");
}

fn assert_not_found(err: ServiceError, message: &str) {
    assert!(matches!(err, ServiceError::NotFound(ref m) if m == message), "wrong error: {err:#?}");
}

#[tokio::test]
async fn create_workspace_makes_caller_owner() {
    let f = Fixture::new().await;
    let response = f.workspaces
        .create(f.owner, &CreateWorkspaceRequest { name: Some("  Board  ".into()) })
        .await
        .expect("workspace creation failed");
    assert_eq!(response.message, "Workspace created successfully");
    assert_eq!(response.workspace.name, "Board");
    assert_eq!(response.workspace.owner_id, f.owner);

    let members = f.members.list(f.owner, response.workspace.id).await
        .expect("listing members failed");
    assert_eq!(members.members.len(), 1);
    assert_eq!(members.members[0].user_id, f.owner);
    assert_eq!(members.members[0].role, Role::Owner);
}

#[tokio::test]
async fn create_workspace_requires_name() {
    let f = Fixture::new().await;
    for name in [None, Some("   ".to_owned())] {
        let err = f.workspaces
            .create(f.owner, &CreateWorkspaceRequest { name })
            .await
            .expect_err("should fail");
        assert_validation(err, "Workspace name is required");
    }
    let listed = f.workspaces.list(f.owner).await.expect("listing failed");
    assert!(listed.workspaces.is_empty(), "rejected workspace was stored");
}

#[tokio::test]
async fn create_workspace_rejects_long_name() {
    let f = Fixture::new().await;
    let err = f.workspaces
        .create(f.owner, &CreateWorkspaceRequest { name: Some("x".repeat(33)) })
        .await
        .expect_err("should fail");
    assert_validation(err, "Workspace name must be at most 32 characters");
}

#[tokio::test]
async fn list_workspaces_only_returns_memberships() {
    let f = Fixture::new().await;
    let mine = f.workspace().await;
    let stranger = make_user(&f.db, "Stranger").await;
    f.workspaces
        .create(stranger, &CreateWorkspaceRequest { name: Some("Other".into()) })
        .await
        .expect("workspace creation failed");

    let listed = f.workspaces.list(f.owner).await.expect("listing failed");
    assert_eq!(listed.workspaces.len(), 1);
    assert_eq!(listed.workspaces[0].id, mine);
    assert_eq!(listed.workspaces[0].role, Some(Role::Owner));
}

#[tokio::test]
async fn update_workspace_allowed_for_admin_only() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let admin = f.member(ws, "Admin", Role::Admin).await;
    let member = f.member(ws, "Member", Role::Member).await;
    let request = UpdateWorkspaceRequest { name: Some("Renamed".into()) };

    let updated = f.workspaces.update(admin, ws, &request).await
        .expect("admin update failed");
    assert_eq!(updated.workspace.name, "Renamed");
    assert_eq!(updated.message, "Workspace updated successfully");

    let err = f.workspaces.update(member, ws, &request).await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to update this workspace");

    let listed = f.workspaces.list(member).await.expect("listing failed");
    assert_eq!(listed.workspaces[0].name, "Renamed");
}

#[tokio::test]
async fn update_workspace_validates_before_permission() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let stranger = make_user(&f.db, "Stranger").await;
    let err = f.workspaces
        .update(stranger, ws, &UpdateWorkspaceRequest { name: Some(" ".into()) })
        .await
        .expect_err("should fail");
    assert_validation(err, "Workspace name is required");
}

#[tokio::test]
async fn unknown_workspace_looks_like_missing_permission() {
    let f = Fixture::new().await;
    let err = f.workspaces
        .update(
            f.owner,
            WorkspaceId::generate(),
            &UpdateWorkspaceRequest { name: Some("x".into()) },
        )
        .await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to update this workspace");
}

#[tokio::test]
async fn delete_workspace_requires_owner() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let admin = f.member(ws, "Admin", Role::Admin).await;
    let err = f.workspaces.delete(admin, ws).await.expect_err("should fail");
    assert_permission(err, "Only the workspace owner can delete the workspace");
}

#[tokio::test]
async fn delete_workspace_removes_contents() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let member = f.member(ws, "Member", Role::Member).await;
    let project = f.project(ws).await;
    let task = f.task(member, ws, project, "Write docs").await;
    f.comment(
        member,
        TaskPath { workspace_id: ws, project_id: project, task_id: task },
        "on it",
    ).await;

    let response = f.workspaces.delete(f.owner, ws).await.expect("deletion failed");
    assert_eq!(response.message, "Workspace deleted successfully");
    assert!(f.workspaces.list(f.owner).await.unwrap().workspaces.is_empty());
    assert!(f.workspaces.list(member).await.unwrap().workspaces.is_empty());
    let err = f.projects.list(f.owner, ws).await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Permission(_)), "wrong error: {err:#?}");

    for query in [
        "SELECT COUNT(*) FROM workspace_members WHERE workspace_id = ?",
        "SELECT COUNT(*) FROM projects WHERE workspace_id = ?",
        "SELECT COUNT(*) FROM workspaces WHERE id = ?",
    ] {
        assert_eq!(f.count(query, ws).await, 0, "rows left behind: {query}");
    }
    assert_eq!(f.count("SELECT COUNT(*) FROM tasks WHERE id = ?", task).await, 0);
    assert_eq!(f.count("SELECT COUNT(*) FROM comments WHERE task_id = ?", task).await, 0);
}

#[tokio::test]
async fn add_member_rules() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let member = f.member(ws, "Member", Role::Member).await;
    make_user(&f.db, "Newbie").await;

    let err = f.members
        .add(
            member,
            ws,
            &AddMemberRequest { email: Some("newbie@example.com".into()), role: None },
        )
        .await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to add members to this workspace");

    let err = f.members
        .add(
            f.owner,
            ws,
            &AddMemberRequest { email: Some("newbie@example.com".into()), role: Some(Role::Owner) },
        )
        .await
        .expect_err("should fail");
    assert_validation(err, "Members can only be added as ADMIN or MEMBER");

    let err = f.members
        .add(
            f.owner,
            ws,
            &AddMemberRequest { email: Some("ghost@example.com".into()), role: None },
        )
        .await
        .expect_err("should fail");
    assert_not_found(err, "User not found");

    let err = f.members
        .add(
            f.owner,
            ws,
            &AddMemberRequest { email: Some("Member@Example.com".into()), role: None },
        )
        .await
        .expect_err("should fail");
    assert_validation(err, "User is already a member of this workspace");

    let added = f.members
        .add(
            f.owner,
            ws,
            &AddMemberRequest { email: Some("newbie@example.com".into()), role: None },
        )
        .await
        .expect("adding member failed");
    assert_eq!(added.member.role, Role::Member);
    assert_eq!(added.member.name, "Newbie");
}

#[tokio::test]
async fn owner_cannot_be_removed_or_leave() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let admin = f.member(ws, "Admin", Role::Admin).await;

    let err = f.members.remove(admin, ws, f.owner).await.expect_err("should fail");
    assert_validation(err, "The workspace owner cannot be removed");
    let err = f.members.leave(f.owner, ws).await.expect_err("should fail");
    assert_validation(err, "The workspace owner cannot leave the workspace");
}

#[tokio::test]
async fn members_can_be_removed_and_leave() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let first = f.member(ws, "First", Role::Member).await;
    let second = f.member(ws, "Second", Role::Member).await;

    let err = f.members.remove(first, ws, second).await.expect_err("should fail");
    assert_permission(err, "You do not have permission to remove members from this workspace");

    f.members.remove(f.owner, ws, second).await.expect("removal failed");
    f.members.leave(first, ws).await.expect("leaving failed");
    let members = f.members.list(f.owner, ws).await.unwrap();
    assert_eq!(members.members.len(), 1);

    let err = f.members.remove(f.owner, ws, second).await.expect_err("should fail");
    assert_not_found(err, "Member not found in this workspace");
}

#[tokio::test]
async fn projects_are_managed_by_admins() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let member = f.member(ws, "Member", Role::Member).await;

    let err = f.projects
        .create(
            member,
            ws,
            &CreateProjectRequest { name: Some("Mine".into()), description: None },
        )
        .await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to create projects in this workspace");

    let project = f.project(ws).await;
    let listed = f.projects.list(member, ws).await.expect("listing failed");
    assert_eq!(listed.projects.len(), 1);
    assert_eq!(listed.projects[0].id, project);

    let updated = f.projects
        .update(
            f.owner,
            ws,
            project,
            &UpdateProjectRequest { name: None, description: Some("Q3 plan".into()) },
        )
        .await
        .expect("update failed");
    assert_eq!(updated.project.name, "Roadmap");
    assert_eq!(updated.project.description.as_deref(), Some("Q3 plan"));

    let err = f.projects.delete(member, ws, project).await.expect_err("should fail");
    assert_permission(err, "You do not have permission to delete projects in this workspace");
}

#[tokio::test]
async fn project_in_another_workspace_is_not_found() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let other_ws = f.workspace().await;
    let project = f.project(other_ws).await;

    let err = f.tasks.list(f.owner, ws, project, None).await.expect_err("should fail");
    assert_not_found(err, "Project not found in this workspace");
    let err = f.projects
        .update(
            f.owner,
            ws,
            project,
            &UpdateProjectRequest { name: Some("x".into()), description: None },
        )
        .await
        .expect_err("should fail");
    assert_not_found(err, "Project not found in this workspace");
}

#[tokio::test]
async fn create_task_applies_defaults() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let member = f.member(ws, "Member", Role::Member).await;
    let project = f.project(ws).await;

    let response = f.tasks
        .create(
            member,
            ws,
            project,
            &CreateTaskRequest { title: Some(" Fix login ".into()), ..Default::default() },
        )
        .await
        .expect("task creation failed");
    assert_eq!(response.message, "Task created successfully");
    assert_eq!(response.task.title, "Fix login");
    assert_eq!(response.task.status, TaskStatus::Todo);
    assert_eq!(response.task.priority, TaskPriority::Medium);
    assert_eq!(response.task.created_by, member);
}

#[tokio::test]
async fn create_task_validation_and_permission() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let project = f.project(ws).await;
    let stranger = make_user(&f.db, "Stranger").await;

    let err = f.tasks
        .create(f.owner, ws, project, &CreateTaskRequest::default())
        .await
        .expect_err("should fail");
    assert_validation(err, "Task title is required");

    let err = f.tasks
        .create(
            stranger,
            ws,
            project,
            &CreateTaskRequest { title: Some("x".into()), ..Default::default() },
        )
        .await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to create tasks in this workspace");

    let err = f.tasks.list(stranger, ws, project, None).await.expect_err("should fail");
    assert_permission(err, "You do not have permission to view tasks in this workspace");
}

#[tokio::test]
async fn list_tasks_filters_by_status() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let project = f.project(ws).await;
    let first = f.task(f.owner, ws, project, "First").await;
    let second = f.task(f.owner, ws, project, "Second").await;
    f.tasks
        .update(
            f.owner,
            ws,
            project,
            second,
            &UpdateTaskRequest { status: Some(TaskStatus::Done), ..Default::default() },
        )
        .await
        .expect("update failed");

    let all = f.tasks.list(f.owner, ws, project, None).await.unwrap();
    assert_eq!(all.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![first, second]);
    let done = f.tasks.list(f.owner, ws, project, Some(TaskStatus::Done)).await.unwrap();
    assert_eq!(done.tasks.len(), 1);
    assert_eq!(done.tasks[0].id, second);
}

#[tokio::test]
async fn update_task_is_partial() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let member = f.member(ws, "Member", Role::Member).await;
    let project = f.project(ws).await;
    let task = f.task(f.owner, ws, project, "Original").await;

    let updated = f.tasks
        .update(
            member,
            ws,
            project,
            task,
            &UpdateTaskRequest { priority: Some(TaskPriority::High), ..Default::default() },
        )
        .await
        .expect("update failed");
    assert_eq!(updated.task.title, "Original");
    assert_eq!(updated.task.priority, TaskPriority::High);
    assert_eq!(updated.task.status, TaskStatus::Todo);

    let err = f.tasks
        .update(
            member,
            ws,
            project,
            task,
            &UpdateTaskRequest { title: Some("   ".into()), ..Default::default() },
        )
        .await
        .expect_err("should fail");
    assert_validation(err, "Task title cannot be empty");
}

#[tokio::test]
async fn task_in_another_project_is_not_found() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let project = f.project(ws).await;
    let other_project = f.project(ws).await;
    let task = f.task(f.owner, ws, other_project, "Elsewhere").await;

    let err = f.tasks
        .update(
            f.owner,
            ws,
            project,
            task,
            &UpdateTaskRequest { title: Some("x".into()), ..Default::default() },
        )
        .await
        .expect_err("should fail");
    assert_not_found(err, "Task not found in this project");
}

#[tokio::test]
async fn task_deletion_rights() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let author = f.member(ws, "Author", Role::Member).await;
    let other = f.member(ws, "Other", Role::Member).await;
    let project = f.project(ws).await;
    let task = f.task(author, ws, project, "Mine").await;
    let second = f.task(author, ws, project, "Also mine").await;

    let err = f.tasks.delete(other, ws, project, task).await.expect_err("should fail");
    assert_permission(err, "You do not have permission to delete this task");

    f.tasks.delete(author, ws, project, task).await.expect("author deletion failed");
    f.tasks.delete(f.owner, ws, project, second).await.expect("owner deletion failed");
    assert!(f.tasks.list(author, ws, project, None).await.unwrap().tasks.is_empty());
}

#[tokio::test]
async fn deleting_task_removes_its_comments() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let project = f.project(ws).await;
    let task = f.task(f.owner, ws, project, "Commented").await;
    let path = TaskPath { workspace_id: ws, project_id: project, task_id: task };
    f.comment(f.owner, path, "first").await;

    f.tasks.delete(f.owner, ws, project, task).await.expect("deletion failed");
    let err = f.comments.list(f.owner, path).await.expect_err("should fail");
    assert_not_found(err, "Task not found in this project");
}

#[tokio::test]
async fn comments_flow() {
    let f = Fixture::new().await;
    let ws = f.workspace().await;
    let author = f.member(ws, "Author", Role::Member).await;
    let other = f.member(ws, "Other", Role::Member).await;
    let project = f.project(ws).await;
    let task = f.task(author, ws, project, "Discuss").await;
    let path = TaskPath { workspace_id: ws, project_id: project, task_id: task };

    let err = f.comments
        .create(author, path, &CreateCommentRequest { content: Some("  ".into()) })
        .await
        .expect_err("should fail");
    assert_validation(err, "Comment content is required");

    let comment = f.comment(author, path, "looks good").await;
    let listed = f.comments.list(other, path).await.expect("listing failed");
    assert_eq!(listed.comments.len(), 1);
    assert_eq!(listed.comments[0].author_name, "Author");
    assert_eq!(listed.comments[0].content, "looks good");

    let err = f.comments
        .update(other, path, comment, &UpdateCommentRequest { content: Some("mine now".into()) })
        .await
        .expect_err("should fail");
    assert_permission(err, "You do not have permission to update this comment");

    let updated = f.comments
        .update(author, path, comment, &UpdateCommentRequest { content: Some("edited".into()) })
        .await
        .expect("update failed");
    assert_eq!(updated.comment.content, "edited");

    let err = f.comments.delete(other, path, comment).await.expect_err("should fail");
    assert_permission(err, "You do not have permission to delete this comment");
    f.comments.delete(f.owner, path, comment).await.expect("manager deletion failed");

    let err = f.comments.delete(author, path, comment).await.expect_err("should fail");
    assert_not_found(err, "Comment not found on this task");
}

#[tokio::test]
async fn internal_errors_do_not_leak() {
    let f = Fixture::new().await;
    f.db.close().await;
    let err = f.workspaces.list(f.owner).await.expect_err("should fail");
    assert!(matches!(err, ServiceError::Internal(_)), "wrong error: {err:#?}");
    assert_eq!(err.to_string(), "internal server error");
}

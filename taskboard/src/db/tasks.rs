use api_data::{ProjectId, TaskId, TaskStatus, WorkspaceId};
use sqlx::SqliteConnection;
use crate::data::TaskRow;
use crate::db::DbError;

pub async fn insert_task(
    conn: &mut SqliteConnection,
    task: &TaskRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO tasks (
             id, project_id, title, description, status, priority,
             created_by, created_at, updated_at
         )
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
        .bind(task.id)
        .bind(task.project_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.created_by)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_task(
    conn: &mut SqliteConnection,
    id: TaskId,
) -> Result<Option<TaskRow>, DbError> {
    Ok(
        sqlx::query_as::<_, TaskRow>(
            "SELECT id, project_id, title, description, status, priority,
                    created_by, created_at, updated_at
             FROM tasks WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

/// Tasks of the project in creation order, optionally only those with the
/// given status.
pub async fn list_tasks(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
    status: Option<TaskStatus>,
) -> Result<Vec<TaskRow>, DbError> {
    Ok(
        sqlx::query_as::<_, TaskRow>(
            "SELECT id, project_id, title, description, status, priority,
                    created_by, created_at, updated_at
             FROM tasks
             WHERE project_id = ?1 AND (?2 IS NULL OR status = ?2)
             ORDER BY created_at, rowid",
        )
            .bind(project_id)
            .bind(status)
            .fetch_all(conn)
            .await?
    )
}

pub async fn update_task(
    conn: &mut SqliteConnection,
    task: &TaskRow,
) -> Result<(), DbError> {
    sqlx::query(
        "UPDATE tasks
         SET title = ?, description = ?, status = ?, priority = ?, updated_at = ?
         WHERE id = ?",
    )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.updated_at)
        .bind(task.id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_task(
    conn: &mut SqliteConnection,
    id: TaskId,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_tasks_of_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM tasks WHERE project_id = ?")
        .bind(project_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_tasks_of_workspace(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "DELETE FROM tasks
         WHERE project_id IN (SELECT id FROM projects WHERE workspace_id = ?)",
    )
        .bind(workspace_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

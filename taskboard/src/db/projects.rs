use api_data::{ProjectId, WorkspaceId};
use sqlx::SqliteConnection;
use crate::data::ProjectRow;
use crate::db::DbError;

pub async fn insert_project(
    conn: &mut SqliteConnection,
    project: &ProjectRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO projects (id, workspace_id, name, description, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
        .bind(project.id)
        .bind(project.workspace_id)
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.created_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_project(
    conn: &mut SqliteConnection,
    id: ProjectId,
) -> Result<Option<ProjectRow>, DbError> {
    Ok(
        sqlx::query_as::<_, ProjectRow>(
            "SELECT id, workspace_id, name, description, created_at
             FROM projects WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn list_projects(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<Vec<ProjectRow>, DbError> {
    Ok(
        sqlx::query_as::<_, ProjectRow>(
            "SELECT id, workspace_id, name, description, created_at
             FROM projects WHERE workspace_id = ?
             ORDER BY created_at, rowid",
        )
            .bind(workspace_id)
            .fetch_all(conn)
            .await?
    )
}

pub async fn update_project(
    conn: &mut SqliteConnection,
    project: &ProjectRow,
) -> Result<(), DbError> {
    sqlx::query("UPDATE projects SET name = ?, description = ? WHERE id = ?")
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_project(
    conn: &mut SqliteConnection,
    id: ProjectId,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_projects_of_workspace(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM projects WHERE workspace_id = ?")
        .bind(workspace_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

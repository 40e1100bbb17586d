use api_data::{UserId, WorkspaceId};
use sqlx::SqliteConnection;
use crate::data::{WorkspaceRow, WorkspaceWithRole};
use crate::db::DbError;

pub async fn insert_workspace(
    conn: &mut SqliteConnection,
    workspace: &WorkspaceRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO workspaces (id, name, owner_id, created_at)
         VALUES (?, ?, ?, ?)",
    )
        .bind(workspace.id)
        .bind(&workspace.name)
        .bind(workspace.owner_id)
        .bind(workspace.created_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

/// Workspaces the user is a member of, with the user's role in each.
pub async fn list_workspaces_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<WorkspaceWithRole>, DbError> {
    Ok(
        sqlx::query_as::<_, WorkspaceWithRole>(
            "SELECT w.id, w.name, w.owner_id, w.created_at, m.role
             FROM workspace_members m
             JOIN workspaces w ON w.id = m.workspace_id
             WHERE m.user_id = ?
             ORDER BY w.created_at, w.rowid",
        )
            .bind(user_id)
            .fetch_all(conn)
            .await?
    )
}

pub async fn rename_workspace(
    conn: &mut SqliteConnection,
    id: WorkspaceId,
    name: &str,
) -> Result<Option<WorkspaceRow>, DbError> {
    Ok(
        sqlx::query_as::<_, WorkspaceRow>(
            "UPDATE workspaces SET name = ? WHERE id = ?
             RETURNING id, name, owner_id, created_at",
        )
            .bind(name)
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

/// Deletes the workspace row only. Dependent rows must be gone already.
pub async fn delete_workspace(
    conn: &mut SqliteConnection,
    id: WorkspaceId,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM workspaces WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

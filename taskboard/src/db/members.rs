use api_data::{UserId, WorkspaceId};
use sqlx::SqliteConnection;
use crate::data::{MemberRow, MembershipRow};
use crate::db::DbError;

pub async fn insert_membership(
    conn: &mut SqliteConnection,
    membership: &MembershipRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO workspace_members (workspace_id, user_id, role, joined_at)
         VALUES (?, ?, ?, ?)",
    )
        .bind(membership.workspace_id)
        .bind(membership.user_id)
        .bind(membership.role)
        .bind(membership.joined_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_membership(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
    user_id: UserId,
) -> Result<Option<MembershipRow>, DbError> {
    Ok(
        sqlx::query_as::<_, MembershipRow>(
            "SELECT workspace_id, user_id, role, joined_at
             FROM workspace_members
             WHERE workspace_id = ? AND user_id = ?",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn find_member(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
    user_id: UserId,
) -> Result<Option<MemberRow>, DbError> {
    Ok(
        sqlx::query_as::<_, MemberRow>(
            "SELECT m.workspace_id, m.user_id, u.email, u.name, m.role, m.joined_at
             FROM workspace_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.workspace_id = ? AND m.user_id = ?",
        )
            .bind(workspace_id)
            .bind(user_id)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn list_members(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<Vec<MemberRow>, DbError> {
    Ok(
        sqlx::query_as::<_, MemberRow>(
            "SELECT m.workspace_id, m.user_id, u.email, u.name, m.role, m.joined_at
             FROM workspace_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.workspace_id = ?
             ORDER BY m.joined_at, m.rowid",
        )
            .bind(workspace_id)
            .fetch_all(conn)
            .await?
    )
}

pub async fn delete_membership(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
    user_id: UserId,
) -> Result<bool, DbError> {
    let result = sqlx::query(
        "DELETE FROM workspace_members WHERE workspace_id = ? AND user_id = ?",
    )
        .bind(workspace_id)
        .bind(user_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_memberships_of_workspace(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM workspace_members WHERE workspace_id = ?")
        .bind(workspace_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

use sqlx::SqliteConnection;
use crate::data::{RefreshSessionRow, SessionId};
use crate::db::DbError;

pub async fn insert_session(
    conn: &mut SqliteConnection,
    session: &RefreshSessionRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO refresh_sessions (id, user_id, token, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
        .bind(session.id)
        .bind(session.user_id)
        .bind(&session.token)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_session_by_token(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<RefreshSessionRow>, DbError> {
    Ok(
        sqlx::query_as::<_, RefreshSessionRow>(
            "SELECT id, user_id, token, expires_at, created_at
             FROM refresh_sessions WHERE token = ?",
        )
            .bind(token)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn find_session(
    conn: &mut SqliteConnection,
    id: SessionId,
) -> Result<Option<RefreshSessionRow>, DbError> {
    Ok(
        sqlx::query_as::<_, RefreshSessionRow>(
            "SELECT id, user_id, token, expires_at, created_at
             FROM refresh_sessions WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

/// Returns whether the session existed.
pub async fn delete_session(
    conn: &mut SqliteConnection,
    id: SessionId,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM refresh_sessions WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

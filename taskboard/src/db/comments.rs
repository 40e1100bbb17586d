use api_data::{CommentId, ProjectId, TaskId, WorkspaceId};
use sqlx::SqliteConnection;
use time::OffsetDateTime;
use crate::data::{CommentRow, NewComment};
use crate::db::DbError;

pub async fn insert_comment(
    conn: &mut SqliteConnection,
    comment: &NewComment,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO comments (id, task_id, author_id, content, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
        .bind(comment.id)
        .bind(comment.task_id)
        .bind(comment.author_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.created_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_comment(
    conn: &mut SqliteConnection,
    id: CommentId,
) -> Result<Option<CommentRow>, DbError> {
    Ok(
        sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.task_id, c.author_id, u.name AS author_name,
                    c.content, c.created_at, c.updated_at
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.id = ?",
        )
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn list_comments(
    conn: &mut SqliteConnection,
    task_id: TaskId,
) -> Result<Vec<CommentRow>, DbError> {
    Ok(
        sqlx::query_as::<_, CommentRow>(
            "SELECT c.id, c.task_id, c.author_id, u.name AS author_name,
                    c.content, c.created_at, c.updated_at
             FROM comments c
             JOIN users u ON u.id = c.author_id
             WHERE c.task_id = ?
             ORDER BY c.created_at, c.rowid",
        )
            .bind(task_id)
            .fetch_all(conn)
            .await?
    )
}

pub async fn update_comment_content(
    conn: &mut SqliteConnection,
    id: CommentId,
    content: &str,
    updated_at: OffsetDateTime,
) -> Result<(), DbError> {
    sqlx::query("UPDATE comments SET content = ?, updated_at = ? WHERE id = ?")
        .bind(content)
        .bind(updated_at)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_comment(
    conn: &mut SqliteConnection,
    id: CommentId,
) -> Result<bool, DbError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete_comments_of_task(
    conn: &mut SqliteConnection,
    task_id: TaskId,
) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM comments WHERE task_id = ?")
        .bind(task_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_comments_of_project(
    conn: &mut SqliteConnection,
    project_id: ProjectId,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "DELETE FROM comments
         WHERE task_id IN (SELECT id FROM tasks WHERE project_id = ?)",
    )
        .bind(project_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_comments_of_workspace(
    conn: &mut SqliteConnection,
    workspace_id: WorkspaceId,
) -> Result<u64, DbError> {
    let result = sqlx::query(
        "DELETE FROM comments
         WHERE task_id IN (
             SELECT t.id FROM tasks t
             JOIN projects p ON p.id = t.project_id
             WHERE p.workspace_id = ?
         )",
    )
        .bind(workspace_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

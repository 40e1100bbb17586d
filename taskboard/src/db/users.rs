use api_data::UserId;
use sqlx::SqliteConnection;
use crate::data::UserRow;
use crate::db::DbError;

pub async fn insert_user(
    conn: &mut SqliteConnection,
    user: &UserRow,
) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO users (id, email, name, password_hash, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(conn)
        .await
        .map_err(DbError::from_insert)?;
    Ok(())
}

pub async fn find_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserRow>, DbError> {
    Ok(
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, password_hash, created_at
             FROM users WHERE email = ?",
        )
            .bind(email)
            .fetch_optional(conn)
            .await?
    )
}

pub async fn find_user(
    conn: &mut SqliteConnection,
    id: UserId,
) -> Result<Option<UserRow>, DbError> {
    Ok(
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, name, password_hash, created_at
             FROM users WHERE id = ?",
        )
            .bind(id)
            .fetch_optional(conn)
            .await?
    )
}

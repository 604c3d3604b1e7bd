use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::notification::NotificationRow;

/// Inserts a notification. Accepts a pool or an open transaction.
pub async fn create_notification<'e, E>(
    executor: E,
    user_id: Uuid,
    message: &str,
) -> Result<Uuid, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar("INSERT INTO notifications (user_id, message) VALUES ($1, $2) RETURNING id")
        .bind(user_id)
        .bind(message)
        .fetch_one(executor)
        .await
}

pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<NotificationRow>, sqlx::Error> {
    sqlx::query_as::<_, NotificationRow>(
        "SELECT * FROM notifications WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn unread_count(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE")
        .bind(user_id)
        .fetch_one(pool)
        .await
}

/// Returns the number of rows touched (0 or 1).
pub async fn mark_read(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn mark_all_read(pool: &PgPool, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
    )
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

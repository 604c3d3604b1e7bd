//! Conversations between a company and a student whose application was accepted.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::conversation::{ConversationSummary, MessageWithSender};

/// Inbox of `user_id`, limited to conversations backed by an accepted application.
pub async fn list_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ConversationSummary>, sqlx::Error> {
    sqlx::query_as::<_, ConversationSummary>(
        r#"
        SELECT c.id,
               c.student_id,
               c.company_id,
               c.job_id,
               c.last_message,
               c.last_message_time,
               c.created_at,
               student.full_name AS student_name,
               company.full_name AS company_name,
               jobs.title AS job_title,
               (SELECT COUNT(*) FROM messages
                WHERE conversation_id = c.id
                  AND sender_id <> $1
                  AND is_read = FALSE) AS unread_count
        FROM conversations c
        JOIN users student ON c.student_id = student.id
        JOIN users company ON c.company_id = company.id
        LEFT JOIN jobs ON c.job_id = jobs.id
        WHERE (c.student_id = $1 OR c.company_id = $1)
          AND EXISTS (
              SELECT 1 FROM applications
              WHERE student_id = c.student_id
                AND job_id = c.job_id
                AND status = 'accepted'
          )
        ORDER BY c.last_message_time DESC NULLS LAST, c.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Messages of a conversation, oldest first. `since` limits to newer messages.
pub async fn list_messages(
    pool: &PgPool,
    conversation_id: Uuid,
    since: Option<DateTime<Utc>>,
) -> Result<Vec<MessageWithSender>, sqlx::Error> {
    sqlx::query_as::<_, MessageWithSender>(
        r#"
        SELECT m.id,
               m.conversation_id,
               m.sender_id,
               m.message,
               m.is_read,
               m.created_at,
               u.full_name AS sender_name,
               u.role AS sender_role
        FROM messages m
        JOIN users u ON m.sender_id = u.id
        WHERE m.conversation_id = $1
          AND ($2::timestamptz IS NULL OR m.created_at > $2)
        ORDER BY m.created_at ASC
        "#,
    )
    .bind(conversation_id)
    .bind(since)
    .fetch_all(pool)
    .await
}

pub async fn find_existing(
    pool: &PgPool,
    student_id: Uuid,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT id FROM conversations WHERE student_id = $1 AND company_id = $2 AND job_id = $3",
    )
    .bind(student_id)
    .bind(company_id)
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

/// Inserts a conversation, returning `None` if a concurrent insert created it first.
pub async fn insert(
    pool: &PgPool,
    student_id: Uuid,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO conversations (student_id, company_id, job_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (student_id, company_id, job_id) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(student_id)
    .bind(company_id)
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

/// Company that posted `job_id`, `None` when the job does not exist.
pub async fn job_company(pool: &PgPool, job_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT company_id FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await
}

/// Locks the conversation row for the rest of `transaction` if `sender_id` takes part in it.
///
/// Concurrent sends to one conversation queue on this lock, so each message is
/// stamped and committed before the next one is stamped.
pub async fn lock_for_sender(
    transaction: &mut Transaction<'_, Postgres>,
    conversation_id: Uuid,
    sender_id: Uuid,
) -> Result<(), AppError> {
    let locked: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT id FROM conversations
        WHERE id = $1 AND (student_id = $2 OR company_id = $2)
        FOR UPDATE
        "#,
    )
    .bind(conversation_id)
    .bind(sender_id)
    .fetch_optional(&mut **transaction)
    .await?;

    locked.map(|_| ()).ok_or_else(|| {
        AppError::Forbidden("Not authorized to send messages in this conversation".to_string())
    })
}

/// Inserts a message and refreshes the conversation summary. Call after [`lock_for_sender`].
///
/// `created_at` is strictly greater than every earlier message in the
/// conversation, so a `since` cursor taken from the last seen message never
/// skips a later one.
pub async fn insert_message(
    transaction: &mut Transaction<'_, Postgres>,
    conversation_id: Uuid,
    sender_id: Uuid,
    message: &str,
) -> Result<(Uuid, DateTime<Utc>), sqlx::Error> {
    let (message_id, created_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
        r#"
        INSERT INTO messages (conversation_id, sender_id, message, created_at)
        VALUES (
            $1, $2, $3,
            GREATEST(
                clock_timestamp(),
                (SELECT MAX(created_at) FROM messages WHERE conversation_id = $1)
                    + INTERVAL '1 microsecond'
            )
        )
        RETURNING id, created_at
        "#,
    )
    .bind(conversation_id)
    .bind(sender_id)
    .bind(message)
    .fetch_one(&mut **transaction)
    .await?;

    sqlx::query(
        "UPDATE conversations SET last_message = $1, last_message_time = $2 WHERE id = $3",
    )
    .bind(message)
    .bind(created_at)
    .bind(conversation_id)
    .execute(&mut **transaction)
    .await?;

    Ok((message_id, created_at))
}

/// Stores a message from a participant and updates the conversation summary.
pub async fn send_message(
    pool: &PgPool,
    conversation_id: Uuid,
    sender_id: Uuid,
    message: &str,
) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;
    lock_for_sender(&mut tx, conversation_id, sender_id).await?;
    let (message_id, _) = insert_message(&mut tx, conversation_id, sender_id, message).await?;
    tx.commit().await?;

    info!("User {sender_id} sent message {message_id} in conversation {conversation_id}");
    Ok(message_id)
}

/// Marks messages not sent by `reader_id` as read. Returns rows touched.
pub async fn mark_read(
    pool: &PgPool,
    conversation_id: Uuid,
    reader_id: Uuid,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE messages SET is_read = TRUE
        WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE
        "#,
    )
    .bind(conversation_id)
    .bind(reader_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

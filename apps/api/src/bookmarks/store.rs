use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{is_unique_violation, violated_foreign_key};
use crate::errors::AppError;
use crate::models::bookmark::BookmarkedJob;

pub async fn list_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<BookmarkedJob>, sqlx::Error> {
    sqlx::query_as::<_, BookmarkedJob>(
        r#"
        SELECT bookmarks.id AS bookmark_id,
               bookmarks.created_at AS bookmarked_at,
               jobs.*,
               users.full_name AS company_name
        FROM bookmarks
        JOIN jobs ON bookmarks.job_id = jobs.id
        JOIN users ON jobs.company_id = users.id
        WHERE bookmarks.student_id = $1
        ORDER BY bookmarks.created_at DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Inserts a bookmark. Duplicates and unknown ids are detected by the constraints.
pub async fn add(pool: &PgPool, student_id: Uuid, job_id: Uuid) -> Result<Uuid, AppError> {
    sqlx::query_scalar("INSERT INTO bookmarks (student_id, job_id) VALUES ($1, $2) RETURNING id")
        .bind(student_id)
        .bind(job_id)
        .fetch_one(pool)
        .await
        .map_err(insert_error)
}

fn insert_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        return AppError::Validation("Already bookmarked".to_string());
    }
    match violated_foreign_key(&err) {
        Some(fk) if fk.contains("student_id") => {
            AppError::NotFound("Student not found".to_string())
        }
        Some(_) => AppError::NotFound("Job not found".to_string()),
        None => AppError::Database(err),
    }
}

pub async fn remove(pool: &PgPool, student_id: Uuid, job_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM bookmarks WHERE student_id = $1 AND job_id = $2")
        .bind(student_id)
        .bind(job_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn exists(pool: &PgPool, student_id: Uuid, job_id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM bookmarks WHERE student_id = $1 AND job_id = $2)",
    )
    .bind(student_id)
    .bind(job_id)
    .fetch_one(pool)
    .await
}

//! Queries over `applications`, including the two writes that notify the other
//! party (submitting an application, changing its status).

use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::applications::status::ApplicationStatus;
use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::models::application::{JobApplicant, StudentApplication};
use crate::notifications::{messages, store::create_notification};

#[derive(Debug, FromRow)]
struct ApplyTarget {
    title: String,
    company_id: Uuid,
    student_name: String,
    student_role: String,
}

#[derive(Debug, FromRow)]
struct StatusTarget {
    student_id: Uuid,
    title: String,
    company_name: String,
}

/// Submits an application for `student_id` and notifies the hiring company.
/// Both rows are written in one transaction.
pub async fn submit_application(
    pool: &PgPool,
    job_id: Uuid,
    student_id: Uuid,
) -> Result<Uuid, AppError> {
    let mut tx = pool.begin().await?;

    let target: Option<ApplyTarget> = sqlx::query_as(
        r#"
        SELECT jobs.title, jobs.company_id,
               users.full_name AS student_name, users.role AS student_role
        FROM jobs
        JOIN users ON users.id = $1
        WHERE jobs.id = $2
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(target) = target else {
        let job_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jobs WHERE id = $1)")
                .bind(job_id)
                .fetch_one(&mut *tx)
                .await?;
        return Err(if job_exists {
            AppError::NotFound("Student not found".to_string())
        } else {
            AppError::NotFound("Job not found".to_string())
        });
    };

    if target.student_role != "student" {
        return Err(AppError::Forbidden("Only students can apply to jobs".to_string()));
    }

    let existing: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM applications WHERE job_id = $1 AND student_id = $2")
            .bind(job_id)
            .bind(student_id)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_some() {
        return Err(already_applied());
    }

    let application_id: Uuid = sqlx::query_scalar(
        "INSERT INTO applications (job_id, student_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(job_id)
    .bind(student_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        // a concurrent request won the race past the pre-check
        if is_unique_violation(&e) {
            already_applied()
        } else {
            AppError::Database(e)
        }
    })?;

    create_notification(
        &mut *tx,
        target.company_id,
        &messages::application_received(&target.student_name, &target.title),
    )
    .await?;

    tx.commit().await?;

    info!("Student {student_id} applied to job {job_id} (application {application_id})");
    Ok(application_id)
}

fn already_applied() -> AppError {
    AppError::Validation("Already applied to this job".to_string())
}

/// Sets the status of an application and notifies the student.
/// Exactly one notification row is written per successful call.
pub async fn update_status(
    pool: &PgPool,
    application_id: Uuid,
    status: ApplicationStatus,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE applications SET status = $1 WHERE id = $2")
        .bind(status.as_str())
        .bind(application_id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        return Err(AppError::NotFound("Application not found".to_string()));
    }

    let target: StatusTarget = sqlx::query_as(
        r#"
        SELECT applications.student_id, jobs.title, users.full_name AS company_name
        FROM applications
        JOIN jobs ON applications.job_id = jobs.id
        JOIN users ON jobs.company_id = users.id
        WHERE applications.id = $1
        "#,
    )
    .bind(application_id)
    .fetch_one(&mut *tx)
    .await?;

    create_notification(
        &mut *tx,
        target.student_id,
        &messages::application_status_changed(status, &target.title, &target.company_name),
    )
    .await?;

    tx.commit().await?;

    info!(
        "Application {application_id} set to {} and student {} notified",
        status.as_str(),
        target.student_id
    );
    Ok(())
}

/// Applications of a student, newest first.
pub async fn list_for_student(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<StudentApplication>, sqlx::Error> {
    sqlx::query_as::<_, StudentApplication>(
        r#"
        SELECT applications.*,
               jobs.title,
               jobs.job_type,
               jobs.location,
               users.full_name AS company_name
        FROM applications
        JOIN jobs ON applications.job_id = jobs.id
        JOIN users ON jobs.company_id = users.id
        WHERE applications.student_id = $1
        ORDER BY applications.applied_at DESC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Applicants for a job, newest first.
pub async fn list_for_job(pool: &PgPool, job_id: Uuid) -> Result<Vec<JobApplicant>, sqlx::Error> {
    sqlx::query_as::<_, JobApplicant>(
        r#"
        SELECT applications.*,
               users.full_name,
               users.email,
               users.level_of_study,
               users.cv_link,
               users.bio,
               users.profile_image
        FROM applications
        JOIN users ON applications.student_id = users.id
        WHERE applications.job_id = $1
        ORDER BY applications.applied_at DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
}

/// True when the student holds an accepted application for the job.
pub async fn has_accepted_application(
    pool: &PgPool,
    student_id: Uuid,
    job_id: Uuid,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM applications
            WHERE student_id = $1 AND job_id = $2 AND status = $3
        )
        "#,
    )
    .bind(student_id)
    .bind(job_id)
    .bind(ApplicationStatus::Accepted.as_str())
    .fetch_one(pool)
    .await
}

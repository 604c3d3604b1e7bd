use sqlx::PgPool;
use uuid::Uuid;

use crate::jobs::filters::JobListQuery;
use crate::models::job::{JobDetail, JobListing, JobRow};

/// Editable job fields, shared by create and update.
#[derive(Debug, Default, serde::Deserialize)]
pub struct JobFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub requirements: Option<String>,
}

/// Active jobs with company name and logo, filtered and sorted per `query`.
pub async fn list_active(
    pool: &PgPool,
    query: &JobListQuery,
) -> Result<Vec<JobListing>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT jobs.*,
               users.full_name AS company_name,
               users.company_logo
        FROM jobs
        JOIN users ON jobs.company_id = users.id
        WHERE jobs.status = 'active'
          AND ($1::text IS NULL OR jobs.job_type = $1)
          AND ($2::text IS NULL
               OR jobs.title ILIKE $2
               OR jobs.description ILIKE $2
               OR jobs.location ILIKE $2)
        ORDER BY {}
        "#,
        query.sort.order_by()
    );

    sqlx::query_as::<_, JobListing>(&sql)
        .bind(query.job_type_filter())
        .bind(query.search_pattern())
        .fetch_all(pool)
        .await
}

pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<JobDetail>, sqlx::Error> {
    sqlx::query_as::<_, JobDetail>(
        r#"
        SELECT jobs.*,
               users.full_name AS company_name,
               users.email AS company_email,
               users.company_description,
               users.company_logo
        FROM jobs
        JOIN users ON jobs.company_id = users.id
        WHERE jobs.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn list_for_company(pool: &PgPool, company_id: Uuid) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        "SELECT * FROM jobs WHERE company_id = $1 ORDER BY created_at DESC",
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    company_id: Uuid,
    title: &str,
    fields: &JobFields,
) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar(
        r#"
        INSERT INTO jobs
            (title, description, job_type, location, salary, requirements, company_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(fields.description.as_deref())
    .bind(fields.job_type.as_deref())
    .bind(fields.location.as_deref())
    .bind(fields.salary.as_deref())
    .bind(fields.requirements.as_deref())
    .bind(company_id)
    .fetch_one(pool)
    .await
}

/// Overwrites the editable fields; `status` is kept when `None`. Returns rows touched.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: &str,
    fields: &JobFields,
    status: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE jobs SET
            title = $1,
            description = $2,
            job_type = $3,
            location = $4,
            salary = $5,
            requirements = $6,
            status = COALESCE($7, status)
        WHERE id = $8
        "#,
    )
    .bind(title)
    .bind(fields.description.as_deref())
    .bind(fields.job_type.as_deref())
    .bind(fields.location.as_deref())
    .bind(fields.salary.as_deref())
    .bind(fields.requirements.as_deref())
    .bind(status)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Deletes a job; applications, bookmarks and conversations cascade.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub requirements: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Job listing entry joined with the posting company.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub company_name: String,
    pub company_logo: Option<String>,
}

/// Single job with the company's contact details.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub company_name: String,
    pub company_email: String,
    pub company_description: Option<String>,
    pub company_logo: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub student_id: Uuid,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

/// An application as the student sees it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StudentApplication {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub title: String,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub company_name: String,
}

/// An application as the hiring company sees it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct JobApplicant {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub full_name: String,
    pub email: String,
    pub level_of_study: Option<String>,
    pub cv_link: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

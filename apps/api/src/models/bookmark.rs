use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::JobRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookmarkedJob {
    pub bookmark_id: Uuid,
    pub bookmarked_at: DateTime<Utc>,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobRow,
    pub company_name: String,
}

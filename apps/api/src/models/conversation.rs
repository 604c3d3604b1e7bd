use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConversationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub job_id: Uuid,
    pub last_message: Option<String>,
    pub last_message_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Inbox entry: a conversation with participant names and unread count.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ConversationSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub conversation: ConversationRow,
    pub student_name: String,
    pub company_name: String,
    pub job_title: Option<String>,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MessageWithSender {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub sender_name: String,
    pub sender_role: String,
}

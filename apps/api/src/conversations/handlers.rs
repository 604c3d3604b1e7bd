use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::applications::store::has_accepted_application;
use crate::conversations::{normalize_message, store};
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::models::conversation::{ConversationSummary, MessageWithSender};
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationRequest {
    pub student_id: Uuid,
    pub company_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub message: String,
    pub conversation_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub message_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MarkReadRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub since: Option<DateTime<Utc>>,
}

/// GET /api/conversations/:user_id
pub async fn handle_list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    Ok(Json(store::list_for_user(&state.db, user_id).await?))
}

/// GET /api/conversations/:id/messages
pub async fn handle_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    Query(query): Query<MessagesQuery>,
) -> Result<Json<Vec<MessageWithSender>>, AppError> {
    Ok(Json(
        store::list_messages(&state.db, conversation_id, query.since).await?,
    ))
}

/// POST /api/conversations
///
/// Returns the existing conversation (200) or creates one (201). Only allowed
/// once the student's application to the job has been accepted.
pub async fn handle_create(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ConversationResponse>), AppError> {
    let CreateConversationRequest {
        student_id,
        company_id,
        job_id,
    } = req;

    if !has_accepted_application(&state.db, student_id, job_id).await? {
        return Err(AppError::Forbidden(
            "Cannot create conversation. Application must be accepted first.".to_string(),
        ));
    }
    if store::job_company(&state.db, job_id).await? != Some(company_id) {
        return Err(AppError::Forbidden(
            "Company does not own this job".to_string(),
        ));
    }

    if let Some(conversation_id) =
        store::find_existing(&state.db, student_id, company_id, job_id).await?
    {
        return Ok((StatusCode::OK, existing(conversation_id)));
    }

    match store::insert(&state.db, student_id, company_id, job_id).await? {
        Some(conversation_id) => {
            info!("Opened conversation {conversation_id} for job {job_id}");
            Ok((
                StatusCode::CREATED,
                Json(ConversationResponse {
                    message: "Conversation created successfully".to_string(),
                    conversation_id,
                }),
            ))
        }
        None => {
            let conversation_id = store::find_existing(&state.db, student_id, company_id, job_id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("conversation vanished after insert conflict"))?;
            Ok((StatusCode::OK, existing(conversation_id)))
        }
    }
}

fn existing(conversation_id: Uuid) -> Json<ConversationResponse> {
    Json(ConversationResponse {
        message: "Conversation already exists".to_string(),
        conversation_id,
    })
}

/// POST /api/conversations/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let text = normalize_message(&req.message)?;
    let message_id =
        store::send_message(&state.db, req.conversation_id, req.sender_id, text).await?;
    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: "Message sent successfully".to_string(),
            message_id,
        }),
    ))
}

/// PUT /api/conversations/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(conversation_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<MarkReadRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    store::mark_read(&state.db, conversation_id, req.user_id).await?;
    Ok(Json(MessageResponse::new("Messages marked as read")))
}

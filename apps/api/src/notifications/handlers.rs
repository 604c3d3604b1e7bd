use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::notification::NotificationRow;
use crate::notifications::store;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

/// GET /api/notifications/:user_id
pub async fn handle_list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<NotificationRow>>, AppError> {
    Ok(Json(store::list_for_user(&state.db, user_id).await?))
}

/// GET /api/notifications/:user_id/unread-count
pub async fn handle_unread_count(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UnreadCountResponse>, AppError> {
    let count = store::unread_count(&state.db, user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// PUT /api/notifications/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if store::mark_read(&state.db, id).await? == 0 {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Notification marked as read")))
}

/// PUT /api/notifications/user/:user_id/read-all
pub async fn handle_mark_all_read(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let updated = store::mark_all_read(&state.db, user_id).await?;
    tracing::debug!("Marked {updated} notifications read for user {user_id}");
    Ok(Json(MessageResponse::new("All notifications marked as read")))
}

/// DELETE /api/notifications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if store::delete(&state.db, id).await? == 0 {
        return Err(AppError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Notification deleted")))
}

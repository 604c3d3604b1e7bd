use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::bookmarks::store;
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::models::bookmark::BookmarkedJob;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct AddBookmarkRequest {
    pub student_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct BookmarkCheckResponse {
    pub is_bookmarked: bool,
}

/// GET /api/bookmarks/:student_id
pub async fn handle_list(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<BookmarkedJob>>, AppError> {
    Ok(Json(store::list_for_student(&state.db, student_id).await?))
}

/// POST /api/bookmarks
pub async fn handle_add(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AddBookmarkRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    store::add(&state.db, req.student_id, req.job_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Job bookmarked successfully")),
    ))
}

/// DELETE /api/bookmarks/:student_id/:job_id
pub async fn handle_remove(
    State(state): State<AppState>,
    Path((student_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    store::remove(&state.db, student_id, job_id).await?;
    Ok(Json(MessageResponse::new("Bookmark removed successfully")))
}

/// GET /api/bookmarks/check/:student_id/:job_id
pub async fn handle_check(
    State(state): State<AppState>,
    Path((student_id, job_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookmarkCheckResponse>, AppError> {
    let is_bookmarked = store::exists(&state.db, student_id, job_id).await?;
    Ok(Json(BookmarkCheckResponse { is_bookmarked }))
}

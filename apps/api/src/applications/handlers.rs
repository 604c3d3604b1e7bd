use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::applications::{status::ApplicationStatus, store};
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::routes::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let status = ApplicationStatus::parse(req.status.trim())?;
    store::update_status(&state.db, id, status).await?;
    Ok(Json(MessageResponse::new(
        "Application status updated and student notified",
    )))
}

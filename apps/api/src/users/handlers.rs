use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::store as applications;
use crate::auth::validation::Role;
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::media::{image_extension, MAX_UPLOAD_BYTES};
use crate::models::application::StudentApplication;
use crate::models::user::User;
use crate::routes::MessageResponse;
use crate::state::AppState;
use crate::users::store::{self, ProfileUpdate};

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub url: String,
}

/// GET /api/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    store::find_by_id(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// PUT /api/users/:id
pub async fn handle_update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(mut req): ValidatedJson<ProfileUpdate>,
) -> Result<Json<MessageResponse>, AppError> {
    req.normalize_full_name()?;
    if store::update_profile(&state.db, id, &req).await? == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

/// GET /api/users/:id/applications
pub async fn handle_student_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<StudentApplication>>, AppError> {
    Ok(Json(applications::list_for_student(&state.db, id).await?))
}

/// POST /api/users/:id/avatar (multipart, field `file`)
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let (data, content_type) = read_image_field(&mut multipart).await?;
    let ext = image_extension(&content_type)
        .ok_or_else(|| AppError::Validation(format!("Unsupported image type '{content_type}'")))?;

    let role = store::role_of(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let role = Role::parse(&role)?;

    let key = format!("avatars/{id}/{}.{ext}", Uuid::new_v4());
    let url = state.media.put(&key, data, &content_type).await?;
    store::set_avatar(&state.db, id, role, &url).await?;

    info!("Stored {} image for user {id} at {url}", role.as_str());
    Ok(Json(AvatarResponse { url }))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<(Bytes, String), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("file must have a content type".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if data.is_empty() {
            return Err(AppError::Validation("file is empty".to_string()));
        }
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "file exceeds {} bytes",
                MAX_UPLOAD_BYTES
            )));
        }
        return Ok((data, content_type));
    }
    Err(AppError::Validation("file is required".to_string()))
}

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::validation::{require_field, trimmed, Role};
use crate::db::is_unique_violation;
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::models::user::User;
use crate::notifications::{messages, store::create_notification};
use crate::routes::MessageResponse;
use crate::state::AppState;
use crate::users::store::{self, NewUser};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "trimmed")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub level_of_study: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub company_description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "trimmed")]
    pub old_password: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 6, message = "New password must be at least 6 characters"))]
    pub new_password: Option<String>,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let full_name = require_field(req.full_name.as_deref(), "full_name")?;
    let email = require_field(req.email.as_deref(), "email")?.to_lowercase();
    let password = require_field(req.password.as_deref(), "password")?;
    let role = Role::parse(req.role.as_deref().unwrap_or_default())?;

    let password_hash = hash_password_blocking(password.to_string()).await?;
    let mut tx = state.db.begin().await?;

    if store::find_by_email(&mut *tx, &email).await?.is_some() {
        return Err(email_taken());
    }

    let user_id = store::insert_user(
        &mut *tx,
        &NewUser {
            full_name,
            email: &email,
            password_hash: &password_hash,
            role,
            bio: req.bio.as_deref(),
            level_of_study: req.level_of_study.as_deref(),
            company_description: req.company_description.as_deref(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            email_taken()
        } else {
            AppError::Database(e)
        }
    })?;

    create_notification(&mut *tx, user_id, messages::WELCOME).await?;
    tx.commit().await?;

    info!("Registered {} {user_id}", role.as_str());
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful".to_string(),
            user_id,
            role: role.as_str().to_string(),
        }),
    ))
}

fn email_taken() -> AppError {
    AppError::Validation("Email already registered".to_string())
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = require_field(req.email.as_deref(), "email")?;
    let password = require_field(req.password.as_deref(), "password")?;

    let user = store::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User with this email not found".to_string()))?;

    if !verify_password_blocking(password.to_string(), user.password_hash.clone()).await {
        info!("Rejected login for user {}: password mismatch", user.id);
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }

    info!("User {} logged in as {}", user.id, user.role);
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user,
    }))
}

/// PUT /api/auth/change-password
pub async fn handle_change_password(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let (Some(user_id), Some(old_password), Some(new_password)) = (
        req.user_id,
        req.old_password.as_deref(),
        req.new_password.as_deref(),
    ) else {
        return Err(AppError::Validation("All fields are required".to_string()));
    };

    let user = store::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password_blocking(old_password.to_string(), user.password_hash.clone()).await {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = hash_password_blocking(new_password.to_string()).await?;
    store::update_password_hash(&state.db, user_id, &new_hash).await?;
    info!("Password changed for user {user_id}");
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::applications::store as applications;
use crate::auth::validation::{require_field, Role};
use crate::errors::AppError;
use crate::extractors::ValidatedJson;
use crate::jobs::filters::{validate_job_status, JobListQuery};
use crate::jobs::store::{self, JobFields};
use crate::models::application::JobApplicant;
use crate::models::job::{JobDetail, JobListing, JobRow};
use crate::routes::MessageResponse;
use crate::state::AppState;
use crate::users::store as users;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    pub company_id: Option<Uuid>,
    #[serde(flatten)]
    pub fields: JobFields,
}

#[derive(Debug, Serialize)]
pub struct CreateJobResponse {
    pub message: String,
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[serde(flatten)]
    pub fields: JobFields,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    pub student_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub application_id: Uuid,
}

/// GET /api/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<Json<Vec<JobListing>>, AppError> {
    Ok(Json(store::list_active(&state.db, &query).await?))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobDetail>, AppError> {
    store::find_detail(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// GET /api/jobs/company/:company_id
pub async fn handle_company_jobs(
    State(state): State<AppState>,
    Path(company_id): Path<Uuid>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    Ok(Json(store::list_for_company(&state.db, company_id).await?))
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<CreateJobResponse>), AppError> {
    let company_id = req
        .company_id
        .ok_or_else(|| AppError::Validation("company_id is required".to_string()))?;
    let title = require_field(req.fields.title.as_deref(), "title")?;

    let role = users::role_of(&state.db, company_id).await?;
    if role.as_deref() != Some(Role::Company.as_str()) {
        return Err(AppError::Forbidden(
            "Only company accounts can post jobs".to_string(),
        ));
    }

    let job_id = store::insert(&state.db, company_id, title, &req.fields).await?;
    info!("Company {company_id} posted job {job_id}");

    Ok((
        StatusCode::CREATED,
        Json(CreateJobResponse {
            message: "Job created successfully".to_string(),
            job_id,
        }),
    ))
}

/// PUT /api/jobs/:id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let title = require_field(req.fields.title.as_deref(), "title")?;
    let status = req
        .status
        .as_deref()
        .map(|s| validate_job_status(s.trim()))
        .transpose()?;

    if store::update(&state.db, id, title, &req.fields, status).await? == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    Ok(Json(MessageResponse::new("Job updated successfully")))
}

/// DELETE /api/jobs/:id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if store::delete(&state.db, id).await? == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    info!("Deleted job {id}");
    Ok(Json(MessageResponse::new("Job deleted successfully")))
}

/// POST /api/jobs/:id/apply
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let application_id = applications::submit_application(&state.db, job_id, req.student_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            message: "Application submitted successfully".to_string(),
            application_id,
        }),
    ))
}

/// GET /api/jobs/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<JobApplicant>>, AppError> {
    Ok(Json(applications::list_for_job(&state.db, job_id).await?))
}

//! Admin endpoints: job management, application review, comments.
//!
//! Every route here sits behind the admin auth middleware; handlers can
//! rely on verified claims being present in request extensions.

use crate::api::{ApiError, AppState};
use crate::auth::AuthClaims;
use crate::store::models::{
    AdminJobRow, Application, ApplicationComment, ApplicationRow, Job, NewComment, NewJob,
    UpdateApplicationStatus, UpdateJob,
};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

/// List all jobs with application counts - GET /api/admin/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<AdminJobRow>>, ApiError> {
    let jobs = state
        .store
        .list_jobs_admin()
        .context("Failed to fetch jobs")?;
    Ok(Json(jobs))
}

/// Create a job - POST /api/admin/jobs
pub async fn create_job(
    State(state): State<AppState>,
    Json(new_job): Json<NewJob>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let required = [
        &new_job.title,
        &new_job.description,
        &new_job.who_we_are_looking_for,
        &new_job.how_to_apply,
        &new_job.location,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    let job = state
        .store
        .create_job(new_job)
        .context("Failed to create job")?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job - PUT /api/admin/jobs/:id
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<UpdateJob>,
) -> Result<Json<Job>, ApiError> {
    state
        .store
        .update_job(&id, changes)
        .context("Failed to update job")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))
}

/// Delete a job - DELETE /api/admin/jobs/:id
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state.store.delete_job(&id).context("Failed to delete job")?;
    if !deleted {
        return Err(ApiError::NotFound("Job not found".to_string()));
    }
    Ok(Json(json!({ "success": true })))
}

/// List all applications - GET /api/admin/applications
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApplicationRow>>, ApiError> {
    let applications = state
        .store
        .list_applications()
        .context("Failed to fetch applications")?;
    Ok(Json(applications))
}

/// Update application status - PUT /api/admin/applications/:id
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateApplicationStatus>,
) -> Result<Json<Application>, ApiError> {
    state
        .store
        .update_application_status(&id, &update.status)
        .context("Failed to update application")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))
}

/// Delete an application - DELETE /api/admin/applications/:id
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let deleted = state
        .store
        .delete_application(&id)
        .context("Failed to delete application")?;
    if !deleted {
        return Err(ApiError::NotFound("Application not found".to_string()));
    }
    Ok(Json(json!({ "success": true })))
}

/// List comments on an application - GET /api/admin/applications/:id/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationComment>>, ApiError> {
    let comments = state
        .store
        .list_comments(&id)
        .context("Failed to fetch comments")?;
    Ok(Json(comments))
}

/// Add a comment to an application - POST /api/admin/applications/:id/comments
///
/// Attribution comes from the verified session claims, never the body.
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(claims): Extension<AuthClaims>,
    Path(id): Path<Uuid>,
    Json(new_comment): Json<NewComment>,
) -> Result<(StatusCode, Json<ApplicationComment>), ApiError> {
    let text = new_comment.comment.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Comment is required".to_string()));
    }

    let comment = state
        .store
        .create_comment(&id, &claims.email, text, new_comment.fitment_tag)
        .context("Failed to create comment")?
        .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

    Ok((StatusCode::CREATED, Json(comment)))
}

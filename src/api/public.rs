//! Public endpoints: job browsing and application submission.

use crate::api::{ApiError, AppState};
use crate::store::models::{Application, Job, JobSummary, NewApplication};
use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

/// Health check endpoint - GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "jobboard-backend".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// List active jobs - GET /api/jobs
pub async fn list_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobSummary>>, ApiError> {
    let jobs = state
        .store
        .list_active_jobs()
        .context("Failed to fetch jobs")?;
    Ok(Json(jobs))
}

/// Get a single active job - GET /api/jobs/:id
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, ApiError> {
    state
        .store
        .get_active_job(&id)
        .context("Failed to fetch job")?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))
}

/// Submit an application - POST /api/applications
pub async fn submit_application(
    State(state): State<AppState>,
    Json(submission): Json<NewApplication>,
) -> Result<(StatusCode, Json<Application>), ApiError> {
    if !submission.is_complete() {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    }

    let application = state
        .store
        .create_application(submission)
        .context("Failed to submit application")?
        .ok_or_else(|| {
            ApiError::NotFound("Job not found or no longer active".to_string())
        })?;

    Ok((StatusCode::CREATED, Json(application)))
}

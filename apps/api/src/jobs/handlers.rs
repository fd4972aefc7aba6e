//! Axum route handler for keyword-driven job search.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::format::JobInfo;
use crate::jobs::search::{search_jobs, SearchCriteria, DEFAULT_JOB_LIMIT};
use crate::state::AppState;

/// Every field is optional; `null` is treated like an omitted field.
#[derive(Debug, Default, Deserialize)]
pub struct SearchJobsRequest {
    pub skills: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub job_titles: Option<Vec<String>>,
    pub industries: Option<Vec<String>>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchJobsResponse {
    pub success: bool,
    pub jobs_found: usize,
    pub jobs: Vec<JobInfo>,
    pub search_criteria: SearchCriteria,
}

/// POST /search-jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    request: Result<Json<SearchJobsRequest>, JsonRejection>,
) -> Result<Json<SearchJobsResponse>, AppError> {
    let Json(request) = request.map_err(|e| AppError::Validation(e.body_text()))?;

    let limit = request.limit.unwrap_or(DEFAULT_JOB_LIMIT);
    let criteria = SearchCriteria {
        skills: request.skills.unwrap_or_default(),
        technologies: request.technologies.unwrap_or_default(),
        job_titles: request.job_titles.unwrap_or_default(),
        industries: request.industries.unwrap_or_default(),
    };

    let search = search_jobs(state.job_feed.as_ref(), &criteria, limit).await;
    info!(
        feed_status = ?search.feed_status,
        jobs = search.jobs.len(),
        "Job search complete"
    );

    Ok(Json(SearchJobsResponse {
        success: true,
        jobs_found: search.jobs.len(),
        jobs: search.jobs,
        search_criteria: criteria,
    }))
}

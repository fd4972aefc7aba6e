//! Axum route handlers for resume upload and text analysis.

use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::jobs::format::JobInfo;
use crate::jobs::search::{search_jobs, SearchCriteria, DEFAULT_JOB_LIMIT};
use crate::resume::extractor::extract_pdf_text_blocking;
use crate::resume::models::ResumeInfo;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ParseResumeResponse {
    pub success: bool,
    pub resume_info: ResumeInfo,
    pub jobs_found: usize,
    pub jobs: Vec<JobInfo>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeTextResponse {
    pub success: bool,
    pub resume_info: ResumeInfo,
}

/// The parts of the multipart upload this endpoint cares about.
struct ResumeUpload {
    filename: String,
    data: Bytes,
    job_limit: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /parse-resume
///
/// Multipart: `resume` (PDF file, required), `job_limit` (integer, default 20).
/// Extract text → structure resume → score the job feed.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let upload = read_upload(multipart).await?;

    if !upload.filename.to_lowercase().ends_with(".pdf") {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }

    info!("Extracting text from PDF ({} bytes)...", upload.data.len());
    let text = extract_pdf_text_blocking(upload.data).await?;

    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "Could not extract text from PDF".to_string(),
        ));
    }

    info!("Extracting resume information...");
    let structured = state.structurer.structure(&text).await;
    if structured.is_degraded() {
        info!("Resume structured with fallback keyword parsing");
    }

    info!("Searching for relevant jobs...");
    let criteria = SearchCriteria::from(&structured.info);
    let search = search_jobs(state.job_feed.as_ref(), &criteria, upload.job_limit).await;
    info!(
        feed_status = ?search.feed_status,
        jobs = search.jobs.len(),
        "Job search complete"
    );

    let jobs_found = search.jobs.len();
    Ok(Json(ParseResumeResponse {
        success: true,
        resume_info: structured.info,
        jobs_found,
        jobs: search.jobs,
        message: format!("Found {jobs_found} relevant job opportunities"),
    }))
}

/// POST /analyze-resume-text
///
/// Structures raw resume text without touching the job feed.
pub async fn handle_analyze_resume_text(
    State(state): State<AppState>,
    request: Result<Json<AnalyzeResumeTextRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResumeTextResponse>, AppError> {
    let Json(request) = request.map_err(|e| AppError::Validation(e.body_text()))?;

    let structured = state.structurer.structure(&request.text).await;

    Ok(Json(AnalyzeResumeTextResponse {
        success: true,
        resume_info: structured.info,
    }))
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut job_limit = DEFAULT_JOB_LIMIT;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid resume upload: {e}")))?;
                file = Some((filename, data));
            }
            Some("job_limit") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_limit: {e}")))?;
                job_limit = parse_job_limit(&raw)?;
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::Validation("No resume file provided".to_string()))?;

    Ok(ResumeUpload {
        filename,
        data,
        job_limit,
    })
}

fn parse_job_limit(raw: &str) -> Result<usize, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_JOB_LIMIT);
    }
    raw.parse::<usize>().map_err(|_| {
        AppError::Validation(format!(
            "job_limit must be a non-negative integer, got '{raw}'"
        ))
    })
}

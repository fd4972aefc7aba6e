use axum::Json;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Resume Parser & Job Matcher API";

/// GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// GET /
/// Static service description and endpoint listing.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /parse-resume": "Upload PDF resume for parsing and job matching",
            "POST /search-jobs": "Search jobs based on skills/criteria",
            "POST /analyze-resume-text": "Analyze resume text directly",
            "GET /health": "Health check"
        }
    }))
}

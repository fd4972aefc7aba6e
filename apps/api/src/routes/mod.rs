pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::jobs::handlers as job_handlers;
use crate::resume::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/parse-resume",
            post(resume_handlers::handle_parse_resume),
        )
        .route(
            "/analyze-resume-text",
            post(resume_handlers::handle_analyze_resume_text),
        )
        .route("/search-jobs", post(job_handlers::handle_search_jobs))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::jobs::feed::FeedOutcome;
    use crate::jobs::search::tests::{listing, StaticFeed};
    use crate::resume::extractor::tests::build_pdf;
    use crate::resume::structurer::ResumeStructurer;

    const BOUNDARY: &str = "jobmatch-test-boundary";

    fn test_state(feed: FeedOutcome) -> AppState {
        AppState {
            structurer: ResumeStructurer::new(None),
            job_feed: Arc::new(StaticFeed(feed)),
            config: Config::default(),
        }
    }

    fn sample_feed() -> FeedOutcome {
        FeedOutcome::Fetched(vec![
            listing("1", "Office Manager", &["admin"]),
            listing("2", "Python Developer", &["python", "django"]),
            listing("3", "Data Engineer", &["python"]),
        ])
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(&b"\r\n"[..]);
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/parse-resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_healthy_with_timestamp() {
        let app = build_router(test_state(sample_feed()));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let app = build_router(test_state(sample_feed()));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Resume Parser & Job Matcher API");
        assert_eq!(body["endpoints"].as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_non_pdf_filename() {
        let app = build_router(test_state(sample_feed()));
        let request = multipart_request(&[("resume", Some("resume.docx"), &b"PK\x03\x04"[..])]);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF files are supported");
    }

    #[tokio::test]
    async fn test_parse_resume_requires_resume_part() {
        let app = build_router(test_state(sample_feed()));
        let request = multipart_request(&[("job_limit", None, &b"5"[..])]);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "No resume file provided");
    }

    #[tokio::test]
    async fn test_parse_resume_rejects_bad_job_limit() {
        let app = build_router(test_state(sample_feed()));
        let request = multipart_request(&[
            ("resume", Some("cv.pdf"), &b"%PDF-1.4"[..]),
            ("job_limit", None, &b"lots"[..]),
        ]);

        let (status, _) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_parse_resume_corrupt_pdf_is_client_error() {
        let app = build_router(test_state(sample_feed()));
        let request =
            multipart_request(&[("resume", Some("CV.PDF"), &b"this is not really a pdf"[..])]);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "EXTRACTION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Error extracting text from PDF"));
    }

    #[tokio::test]
    async fn test_parse_resume_end_to_end_with_fallback() {
        let app = build_router(test_state(sample_feed()));
        let pdf = build_pdf(&["Senior Python Developer"]);
        let request = multipart_request(&[
            ("resume", Some("resume.pdf"), &pdf[..]),
            ("job_limit", None, &b"1"[..]),
        ]);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["resume_info"]["years_of_experience"], "Not determined");
        let technologies = body["resume_info"]["technologies"].as_array().unwrap();
        assert!(technologies.contains(&json!("python")));
        assert_eq!(body["jobs_found"], 1);
        assert_eq!(body["jobs"][0]["position"], "Python Developer");
        assert_eq!(body["message"], "Found 1 relevant job opportunities");
    }

    #[tokio::test]
    async fn test_search_jobs_ranks_title_match() {
        let app = build_router(test_state(sample_feed()));
        let request = json_request("/search-jobs", r#"{"skills": ["python"], "limit": 5}"#);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["jobs_found"], 2);

        let top = &body["jobs"][0];
        assert_eq!(top["position"], "Python Developer");
        assert!(top["relevance_score"].as_u64().unwrap() >= 3);
        assert!(top["matched_keywords"]
            .as_array()
            .unwrap()
            .contains(&json!("python")));
        assert_eq!(body["search_criteria"]["skills"], json!(["python"]));
        assert_eq!(body["search_criteria"]["industries"], json!([]));
    }

    #[tokio::test]
    async fn test_search_jobs_accepts_null_fields() {
        let app = build_router(test_state(sample_feed()));
        let request = json_request("/search-jobs", r#"{"skills": null, "limit": null}"#);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs_found"], 0);
    }

    #[tokio::test]
    async fn test_search_jobs_feed_outage_returns_empty_list() {
        let app = build_router(test_state(FeedOutcome::Unavailable {
            reason: "status 503".to_string(),
        }));
        let request = json_request("/search-jobs", r#"{"skills": ["python"]}"#);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs_found"], 0);
        assert_eq!(body["jobs"], json!([]));
    }

    #[tokio::test]
    async fn test_search_jobs_malformed_body_is_400() {
        let app = build_router(test_state(sample_feed()));
        let request = json_request("/search-jobs", r#"{"skills": ["python""#);

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_analyze_resume_text_uses_fallback_without_llm() {
        let app = build_router(test_state(sample_feed()));
        let request = json_request(
            "/analyze-resume-text",
            r#"{"text": "Lead engineer: Kubernetes, Docker, TypeScript"}"#,
        );

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(
            body["resume_info"]["technologies"],
            json!(["docker", "kubernetes", "typescript"])
        );
        assert_eq!(body["resume_info"]["job_titles"], json!(["engineer", "lead"]));
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let app = build_router(test_state(sample_feed()));
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/search-jobs")
            .header(header::ORIGIN, "https://frontend.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}

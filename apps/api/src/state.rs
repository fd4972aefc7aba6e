use std::sync::Arc;

use crate::config::Config;
use crate::jobs::feed::JobFeed;
use crate::resume::structurer::ResumeStructurer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything in here is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Wraps the optional LLM client; falls back to keyword parsing without one.
    pub structurer: ResumeStructurer,
    /// Pluggable job feed. Default: RemoteOkFeed.
    pub job_feed: Arc<dyn JobFeed>,
    pub config: Config,
}

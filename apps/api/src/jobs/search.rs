use serde::Serialize;
use tracing::{info, warn};

use crate::jobs::feed::{FeedOutcome, JobFeed};
use crate::jobs::format::JobInfo;
use crate::jobs::scoring::{build_keywords, rank_jobs};
use crate::resume::models::ResumeInfo;

pub const DEFAULT_JOB_LIMIT: usize = 20;

/// The keyword-bearing subset of a resume. `industries` is echoed back to
/// callers but does not take part in scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchCriteria {
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub job_titles: Vec<String>,
    pub industries: Vec<String>,
}

impl From<&ResumeInfo> for SearchCriteria {
    fn from(info: &ResumeInfo) -> Self {
        Self {
            skills: info.skills.clone(),
            technologies: info.technologies.clone(),
            job_titles: info.job_titles.clone(),
            industries: info.industries.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Ok,
    Unavailable,
}

/// Ranked results plus whether the feed was reachable at all.
#[derive(Debug, Clone)]
pub struct JobSearch {
    pub jobs: Vec<JobInfo>,
    pub feed_status: FeedStatus,
}

/// Fetches the feed, scores every job against the criteria, returns the top `limit`.
/// A feed outage yields an empty list with `FeedStatus::Unavailable`.
pub async fn search_jobs(feed: &dyn JobFeed, criteria: &SearchCriteria, limit: usize) -> JobSearch {
    let listings = match feed.fetch().await {
        FeedOutcome::Fetched(listings) => listings,
        FeedOutcome::Unavailable { reason } => {
            warn!("Job feed unavailable, returning no matches: {reason}");
            return JobSearch {
                jobs: vec![],
                feed_status: FeedStatus::Unavailable,
            };
        }
    };

    let keywords = build_keywords(
        &criteria.skills,
        &criteria.technologies,
        &criteria.job_titles,
    );
    let total = listings.len();
    let jobs: Vec<JobInfo> = rank_jobs(listings, &keywords, limit)
        .into_iter()
        .map(JobInfo::from)
        .collect();

    info!(
        "Matched {} of {} feed jobs using {} keywords",
        jobs.len(),
        total,
        keywords.len()
    );

    JobSearch {
        jobs,
        feed_status: FeedStatus::Ok,
    }
}

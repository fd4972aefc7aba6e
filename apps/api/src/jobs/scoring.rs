//! Job Relevance Scorer: keyword overlap between resume keywords and feed jobs.
//!
//! Algorithm:
//! 1. Keywords = lower-cased skills, then technologies, then job titles; first 20 kept.
//! 2. For each of the first 100 jobs and each keyword, the first band that matches scores:
//!    - substring of the lower-cased position title → 3
//!    - exact member of the lower-cased tag set     → 2
//!    - substring of the lower-cased description    → 1
//! 3. Zero-score jobs are dropped; the rest are stably sorted by score descending.

use std::collections::HashSet;

use crate::jobs::listing::JobListing;

pub const MAX_KEYWORDS: usize = 20;
pub const MAX_JOBS_CONSIDERED: usize = 100;

/// Priority tier a keyword matched in. At most one band scores per keyword per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordBand {
    Title,
    Tags,
    Description,
}

impl KeywordBand {
    pub fn weight(self) -> u32 {
        match self {
            KeywordBand::Title => 3,
            KeywordBand::Tags => 2,
            KeywordBand::Description => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoredJob {
    pub score: u32,
    /// Distinct matched keywords, in first-match order.
    pub matched_keywords: Vec<String>,
    pub job: JobListing,
}

/// Builds the scoring keyword list. Duplicates are kept and each one scores.
pub fn build_keywords(
    skills: &[String],
    technologies: &[String],
    job_titles: &[String],
) -> Vec<String> {
    skills
        .iter()
        .chain(technologies)
        .chain(job_titles)
        .map(|k| k.to_lowercase())
        .take(MAX_KEYWORDS)
        .collect()
}

/// Lower-cased searchable fields of one job, computed once per job.
struct JobText {
    title: String,
    tags: HashSet<String>,
    description: String,
}

impl JobText {
    fn new(job: &JobListing) -> Self {
        Self {
            title: job.position.as_deref().unwrap_or_default().to_lowercase(),
            tags: job.tags.iter().map(|t| t.to_lowercase()).collect(),
            description: job.description.as_deref().unwrap_or_default().to_lowercase(),
        }
    }

    fn band_for(&self, keyword: &str) -> Option<KeywordBand> {
        // An empty keyword would be a substring of every title.
        if keyword.is_empty() {
            None
        } else if self.title.contains(keyword) {
            Some(KeywordBand::Title)
        } else if self.tags.contains(keyword) {
            Some(KeywordBand::Tags)
        } else if self.description.contains(keyword) {
            Some(KeywordBand::Description)
        } else {
            None
        }
    }
}

/// Scores one job against an already-built keyword list.
pub fn score_job(job: &JobListing, keywords: &[String]) -> (u32, Vec<String>) {
    let text = JobText::new(job);
    let mut score = 0;
    let mut matched: Vec<String> = Vec::new();

    for keyword in keywords.iter().take(MAX_KEYWORDS) {
        if let Some(band) = text.band_for(keyword) {
            score += band.weight();
            if !matched.contains(keyword) {
                matched.push(keyword.clone());
            }
        }
    }

    (score, matched)
}

/// Scores the first 100 jobs, drops non-matches, and returns the top `limit`.
/// Ties keep feed order.
pub fn rank_jobs(jobs: Vec<JobListing>, keywords: &[String], limit: usize) -> Vec<ScoredJob> {
    let mut scored: Vec<ScoredJob> = jobs
        .into_iter()
        .take(MAX_JOBS_CONSIDERED)
        .filter_map(|job| {
            let (score, matched_keywords) = score_job(&job, keywords);
            (score > 0).then_some(ScoredJob {
                score,
                matched_keywords,
                job,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

use serde::Serialize;

use crate::jobs::feed::JOB_DETAIL_URL_PREFIX;
use crate::jobs::scoring::ScoredJob;

const DESCRIPTION_PREVIEW_CHARS: usize = 500;

/// A ranked job as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobInfo {
    pub position: String,
    pub company: String,
    pub salary: String,
    pub location: String,
    pub tags: Vec<String>,
    pub apply_url: String,
    pub date_posted: String,
    pub description: String,
    pub relevance_score: u32,
    pub matched_keywords: Vec<String>,
}

impl From<ScoredJob> for JobInfo {
    fn from(scored: ScoredJob) -> Self {
        let job = scored.job;
        let apply_url = job
            .apply_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{JOB_DETAIL_URL_PREFIX}{}",
                    job.id.as_deref().unwrap_or_default()
                )
            });

        Self {
            position: job.position.unwrap_or_else(|| "N/A".to_string()),
            company: job.company.unwrap_or_else(|| "N/A".to_string()),
            salary: format_salary(job.salary_min, job.salary_max),
            location: job.location.unwrap_or_else(|| "Remote".to_string()),
            tags: job.tags,
            apply_url,
            date_posted: job.date.unwrap_or_default(),
            description: preview_description(job.description.as_deref()),
            relevance_score: scored.score,
            matched_keywords: scored.matched_keywords,
        }
    }
}

/// "$min - $max", "$min+", "Up to $max" or "Not specified".
pub fn format_salary(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("${} - ${}", group_thousands(min), group_thousands(max)),
        (Some(min), None) => format!("${}+", group_thousands(min)),
        (None, Some(max)) => format!("Up to ${}", group_thousands(max)),
        (None, None) => "Not specified".to_string(),
    }
}

/// First 500 characters plus "..." for any non-empty description; "N/A" otherwise.
pub fn preview_description(description: Option<&str>) -> String {
    match description {
        Some(text) if !text.is_empty() => {
            let preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
            format!("{preview}...")
        }
        _ => "N/A".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

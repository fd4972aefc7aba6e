//! Resume Structurer: raw resume text into a fixed-shape `ResumeInfo`.
//!
//! Primary path: one chat-completion call asking for strict JSON.
//! Fallback path: substring containment against fixed technology and title lists.
//!
//! `structure` never fails. The returned `StructureSource` records which path
//! produced the record so callers and tests can tell "LLM down" from "LLM said so".

use tracing::{error, info, warn};

use crate::llm_client::LlmClient;
use crate::resume::models::{ResumeInfo, YEARS_NOT_DETERMINED};
use crate::resume::prompts::{build_resume_prompt, RESUME_PARSE_SYSTEM};

/// Technology tokens recognised by the fallback parser, in reporting order.
pub const TECH_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "java",
    "react",
    "node.js",
    "sql",
    "html",
    "css",
    "mongodb",
    "postgresql",
    "mysql",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "git",
    "linux",
    "typescript",
    "angular",
    "vue",
    "php",
    "ruby",
    "go",
    "c++",
    "c#",
    ".net",
    "spring",
    "django",
    "flask",
    "express",
    "laravel",
];

/// Job-title tokens recognised by the fallback parser, in reporting order.
pub const JOB_TITLE_KEYWORDS: &[&str] = &[
    "developer",
    "engineer",
    "programmer",
    "analyst",
    "manager",
    "lead",
    "senior",
    "junior",
    "architect",
    "consultant",
    "specialist",
    "coordinator",
];

/// Cap on the fallback `skills` list.
const FALLBACK_SKILLS_LIMIT: usize = 10;

/// Which path produced a `ResumeInfo`.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureSource {
    Llm,
    Fallback { reason: String },
}

#[derive(Debug, Clone)]
pub struct StructuredResume {
    pub info: ResumeInfo,
    pub source: StructureSource,
}

impl StructuredResume {
    pub fn is_degraded(&self) -> bool {
        matches!(self.source, StructureSource::Fallback { .. })
    }
}

/// Holds the optional LLM client. Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct ResumeStructurer {
    llm: Option<LlmClient>,
}

impl ResumeStructurer {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn structure(&self, text: &str) -> StructuredResume {
        let Some(llm) = &self.llm else {
            warn!("LLM API key not available. Using fallback parsing.");
            return fallback(text, "language model not configured".to_string());
        };

        let prompt = build_resume_prompt(text);
        match llm.call_json::<ResumeInfo>(&prompt, RESUME_PARSE_SYSTEM).await {
            Ok(info) => {
                info!(
                    "LLM structured resume: {} skills, {} technologies, {} job titles",
                    info.skills.len(),
                    info.technologies.len(),
                    info.job_titles.len()
                );
                StructuredResume {
                    info,
                    source: StructureSource::Llm,
                }
            }
            Err(e) => {
                error!("Error extracting resume info: {e}");
                info!("Falling back to basic parsing...");
                fallback(text, e.to_string())
            }
        }
    }
}

fn fallback(text: &str, reason: String) -> StructuredResume {
    StructuredResume {
        info: fallback_parse(text),
        source: StructureSource::Fallback { reason },
    }
}

/// Dependency-free keyword extraction. Pure substring containment on lower-cased text.
pub fn fallback_parse(text: &str) -> ResumeInfo {
    let text_lower = text.to_lowercase();

    let technologies: Vec<String> = TECH_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();

    let job_titles: Vec<String> = JOB_TITLE_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .map(|kw| kw.to_string())
        .collect();

    ResumeInfo {
        skills: technologies.iter().take(FALLBACK_SKILLS_LIMIT).cloned().collect(),
        experience: vec![],
        education: vec![],
        technologies,
        job_titles: job_titles.clone(),
        industries: vec![],
        years_of_experience: YEARS_NOT_DETERMINED.to_string(),
        preferred_roles: job_titles,
    }
}

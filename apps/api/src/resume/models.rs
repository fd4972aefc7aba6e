use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const YEARS_NOT_DETERMINED: &str = "Not determined";

/// Structured view of a resume. Produced fresh per request and never persisted.
///
/// Deserialization is lenient because the primary source is LLM output: missing or
/// null lists become empty, scalar entries are stringified, and a numeric
/// `years_of_experience` is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeInfo {
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub job_titles: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub industries: Vec<String>,
    #[serde(
        default = "years_not_determined",
        deserialize_with = "lenient_years"
    )]
    pub years_of_experience: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub preferred_roles: Vec<String>,
}

impl ResumeInfo {
    /// The degraded shape: every list empty, years "Not determined".
    pub fn empty() -> Self {
        Self {
            skills: vec![],
            experience: vec![],
            education: vec![],
            technologies: vec![],
            job_titles: vec![],
            industries: vec![],
            years_of_experience: years_not_determined(),
            preferred_roles: vec![],
        }
    }
}

impl Default for ResumeInfo {
    fn default() -> Self {
        Self::empty()
    }
}

fn years_not_determined() -> String {
    YEARS_NOT_DETERMINED.to_string()
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => vec![],
    })
}

fn lenient_years<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(scalar_to_string)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(years_not_determined))
}

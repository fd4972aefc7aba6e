// LLM prompt constants for the Resume Structurer.

/// System prompt for resume structuring.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an expert resume parser. Extract information accurately and return valid JSON.";

/// Resume structuring prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text and extract key information in JSON format:

Resume Text:
{resume_text}

Please extract and return a JSON object with the following structure:
{
    "skills": ["skill1", "skill2", ...],
    "experience": ["job_title at company", ...],
    "education": ["degree from institution", ...],
    "technologies": ["tech1", "tech2", ...],
    "job_titles": ["title1", "title2", ...],
    "industries": ["industry1", "industry2", ...],
    "years_of_experience": "number",
    "preferred_roles": ["role1", "role2", ...]
}

Focus on technical skills, programming languages, frameworks, tools, and relevant job titles."#;

pub fn build_resume_prompt(resume_text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

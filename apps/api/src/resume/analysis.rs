//! Analysis prompt assembly and the fixed output schema.
//!
//! The LLM response is normalized with defaults: any field the model omits
//! deserializes to its zero value rather than failing the request.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resume::prompts::{RESUME_ANALYSIS_PROMPT, RESUME_ANALYSIS_SYSTEM};

/// Job-description text beyond this is not sent to the model.
const JD_CHAR_LIMIT: usize = 2500;
/// Resume text beyond this is not sent to the model.
const RESUME_CHAR_LIMIT: usize = 5000;

/// Everything the caller supplied about the target position, plus the
/// extracted resume text.
#[derive(Debug)]
pub struct AnalysisContext {
    pub resume_text: String,
    pub job_type: String,
    pub job_description: String,
    pub experience_level: String,
    pub years_of_experience: String,
    pub required_skills: String,
    pub company_name: String,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeAnalysis {
    pub overall_score: u32,
    pub ats_score: u32,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub additions: Vec<String>,
    pub deletions: Vec<String>,
    pub keyword_analysis: KeywordAnalysis,
    pub section_feedback: Vec<SectionFeedback>,
    pub action_items: Vec<String>,
    pub red_flags: Vec<String>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_percentage: u32,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionFeedback {
    pub section: String,
    pub score: u32,
    pub feedback: String,
}

/// Runs the analysis call and returns the normalized report.
pub async fn analyse_resume(
    llm: &LlmClient,
    ctx: &AnalysisContext,
) -> Result<ResumeAnalysis, AppError> {
    let prompt = build_analysis_prompt(ctx);
    llm.call_json::<ResumeAnalysis>(RESUME_ANALYSIS_SYSTEM, &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))
}

/// Fills the analysis template, truncating the free-text inputs.
pub fn build_analysis_prompt(ctx: &AnalysisContext) -> String {
    let company = if ctx.company_name.trim().is_empty() {
        "Target Company"
    } else {
        ctx.company_name.trim()
    };
    let required_skills = if ctx.required_skills.trim().is_empty() {
        "Not specified"
    } else {
        ctx.required_skills.trim()
    };

    RESUME_ANALYSIS_PROMPT
        .replace("{job_type}", ctx.job_type.trim())
        .replace("{company_name}", company)
        .replace("{experience_level}", ctx.experience_level.trim())
        .replace("{years_of_experience}", ctx.years_of_experience.trim())
        .replace("{required_skills}", required_skills)
        .replace(
            "{job_description}",
            &truncate_chars(&ctx.job_description, JD_CHAR_LIMIT),
        )
        .replace(
            "{resume_text}",
            &truncate_chars(&ctx.resume_text, RESUME_CHAR_LIMIT),
        )
}

/// Char-boundary-safe truncation.
fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AnalysisContext {
        AnalysisContext {
            resume_text: "Rust engineer, 3 years of axum and sqlx.".to_string(),
            job_type: "Backend Engineer".to_string(),
            job_description: "We need a backend engineer.".to_string(),
            experience_level: "MID".to_string(),
            years_of_experience: "3".to_string(),
            required_skills: "Rust, PostgreSQL".to_string(),
            company_name: String::new(),
        }
    }

    #[test]
    fn test_prompt_fills_placeholders_and_defaults_company() {
        let prompt = build_analysis_prompt(&ctx());
        assert!(prompt.contains("Backend Engineer position at Target Company"));
        assert!(prompt.contains("Required Skills: Rust, PostgreSQL"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let s = "é".repeat(20);
        assert_eq!(truncate_chars(&s, 5), "é".repeat(5));
    }

    #[test]
    fn test_missing_fields_normalize_to_defaults() {
        let analysis: ResumeAnalysis =
            serde_json::from_str(r#"{"overallScore": 72, "strengths": ["clear layout"]}"#).unwrap();
        assert_eq!(analysis.overall_score, 72);
        assert_eq!(analysis.ats_score, 0);
        assert_eq!(analysis.strengths, vec!["clear layout".to_string()]);
        assert!(analysis.weaknesses.is_empty());
        assert_eq!(analysis.keyword_analysis.match_percentage, 0);
        assert!(analysis.section_feedback.is_empty());
    }

    #[test]
    fn test_full_payload_parses() {
        let analysis: ResumeAnalysis = serde_json::from_str(
            r#"{
                "overallScore": 81,
                "atsScore": 75,
                "strengths": ["a"],
                "weaknesses": ["b"],
                "additions": ["c"],
                "deletions": ["d"],
                "keywordAnalysis": {"matched": ["rust"], "missing": ["k8s"], "matchPercentage": 60},
                "sectionFeedback": [{"section": "Skills", "score": 70, "feedback": "solid"}],
                "actionItems": ["e"],
                "redFlags": []
            }"#,
        )
        .unwrap();
        assert_eq!(analysis.keyword_analysis.matched, vec!["rust".to_string()]);
        assert_eq!(analysis.section_feedback[0].score, 70);
    }
}

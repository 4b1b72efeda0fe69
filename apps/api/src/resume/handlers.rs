//! Axum route handlers for the resume analysis gateway.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::resume::analysis::{analyse_resume, AnalysisContext, ResumeAnalysis};
use crate::resume::extract::extract_text;
use crate::state::AppState;

/// POST /api/v1/resume/analyse
///
/// Multipart upload: a `resume` file (PDF or DOCX) plus job-context fields.
/// Rate limited per caller address; the file is analyzed in-flight and never
/// persisted.
pub async fn handle_analyse_resume(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ResumeAnalysis>, AppError> {
    let caller = client_ip(&headers);
    state.rate_limiter.check(&caller).await?;

    let mut file: Option<(String, Bytes)> = None;
    let mut fields: HashMap<String, String> = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "resume" {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            file = Some((content_type, data));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;
            fields.insert(name, value);
        }
    }

    let (content_type, data) = file.ok_or_else(required_inputs_missing)?;
    let job_description = fields
        .get("jobDescription")
        .map(String::as_str)
        .unwrap_or_default();
    if job_description.trim().is_empty() {
        return Err(required_inputs_missing());
    }

    let resume_text = extract_text(&content_type, &data)?;

    let take = |key: &str| fields.get(key).cloned().unwrap_or_default();
    let ctx = AnalysisContext {
        resume_text,
        job_type: take("jobType"),
        job_description: job_description.to_string(),
        experience_level: take("experienceLevel"),
        years_of_experience: take("yearsOfExperience"),
        required_skills: take("requiredSkills"),
        company_name: take("companyName"),
    };

    let analysis = analyse_resume(&state.llm, &ctx).await?;
    Ok(Json(analysis))
}

fn required_inputs_missing() -> AppError {
    AppError::Validation("Resume file and job description are required.".to_string())
}

/// First hop of `x-forwarded-for`, or "unknown" when the proxy did not set it.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_ip_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(client_ip(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_defaults_to_unknown() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }
}

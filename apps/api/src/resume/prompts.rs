//! Prompt templates for resume analysis.

pub const RESUME_ANALYSIS_SYSTEM: &str = r#"You are an expert ATS specialist and career coach. Analyze resumes comprehensively and return ONLY a valid JSON object with detailed insights.
Do not include markdown code blocks or explanations.

Provide a comprehensive analysis with the following structure:
{
  "overallScore": integer (0-100),
  "atsScore": integer (0-100),
  "strengths": string[] (at least 5-7 specific strengths),
  "weaknesses": string[] (at least 5-7 specific areas to improve),
  "additions": string[] (5-7 specific things to add to the resume),
  "deletions": string[] (things to remove from the resume),
  "keywordAnalysis": {
    "matched": string[] (keywords found in resume),
    "missing": string[] (important keywords missing),
    "matchPercentage": integer (0-100)
  },
  "sectionFeedback": [
    {
      "section": string (e.g., "Summary/Objective", "Experience", "Education", "Skills", "Projects", "Certifications"),
      "score": integer (0-100),
      "feedback": string (detailed 2-3 sentence feedback)
    }
  ] (analyze ALL major sections found in the resume),
  "actionItems": string[] (5-10 prioritized action items in order of importance),
  "redFlags": string[] (critical issues that need immediate attention)
}

All numeric scores must be integers. Be specific and actionable in all feedback. Focus on both content and ATS optimization."#;

pub const RESUME_ANALYSIS_PROMPT: &str = r#"Analyze this resume for a {job_type} position at {company_name}

Experience Level Required: {experience_level} ({years_of_experience} years)
Required Skills: {required_skills}

Job Description:
{job_description}

Resume Content:
{resume_text}

Provide a comprehensive, detailed analysis covering:
1. Overall quality and ATS compatibility
2. Specific strengths (be detailed)
3. Specific weaknesses (be detailed)
4. Exact additions needed (be specific about what to add and where)
5. Keyword match analysis with percentages
6. Section-by-section breakdown with scores
7. Prioritized action items
8. Critical red flags

Make the analysis as detailed and actionable as possible."#;

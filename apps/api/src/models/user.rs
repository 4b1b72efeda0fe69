use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub id: Uuid,
    pub clerk_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub experience: Option<String>,
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillScoreRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub skill: String,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRoleRow {
    pub user_id: Uuid,
    pub role: String,
}

/// Skills a user can accumulate points in. Stored as their
/// SCREAMING_SNAKE_CASE string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkillType {
    Dsa,
    WebDevelopment,
    Projects,
    SystemDesign,
    MachineLearning,
    DataAnalysis,
    Sql,
    Statistics,
}

impl SkillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillType::Dsa => "DSA",
            SkillType::WebDevelopment => "WEB_DEVELOPMENT",
            SkillType::Projects => "PROJECTS",
            SkillType::SystemDesign => "SYSTEM_DESIGN",
            SkillType::MachineLearning => "MACHINE_LEARNING",
            SkillType::DataAnalysis => "DATA_ANALYSIS",
            SkillType::Sql => "SQL",
            SkillType::Statistics => "STATISTICS",
        }
    }

    pub const ALL: [SkillType; 8] = [
        SkillType::Dsa,
        SkillType::WebDevelopment,
        SkillType::Projects,
        SkillType::SystemDesign,
        SkillType::MachineLearning,
        SkillType::DataAnalysis,
        SkillType::Sql,
        SkillType::Statistics,
    ];
}

/// Job roles selectable during onboarding (up to 3 per user).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobRole {
    Sde,
    Frontend,
    Backend,
    Fullstack,
    DataAnalyst,
    DataScientist,
    MlEngineer,
    Devops,
    CyberSecurity,
}

impl JobRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobRole::Sde => "SDE",
            JobRole::Frontend => "FRONTEND",
            JobRole::Backend => "BACKEND",
            JobRole::Fullstack => "FULLSTACK",
            JobRole::DataAnalyst => "DATA_ANALYST",
            JobRole::DataScientist => "DATA_SCIENTIST",
            JobRole::MlEngineer => "ML_ENGINEER",
            JobRole::Devops => "DEVOPS",
            JobRole::CyberSecurity => "CYBER_SECURITY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    Fresher,
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "FRESHER",
            ExperienceLevel::Junior => "JUNIOR",
            ExperienceLevel::Mid => "MID",
            ExperienceLevel::Senior => "SENIOR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_type_serde_matches_as_str() {
        for skill in SkillType::ALL {
            let json = serde_json::to_string(&skill).unwrap();
            assert_eq!(json, format!("\"{}\"", skill.as_str()));
        }
    }

    #[test]
    fn test_job_role_round_trip() {
        let role: JobRole = serde_json::from_str("\"CYBER_SECURITY\"").unwrap();
        assert_eq!(role, JobRole::CyberSecurity);
        assert_eq!(role.as_str(), "CYBER_SECURITY");
    }
}

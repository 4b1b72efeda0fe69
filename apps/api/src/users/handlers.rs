//! Axum route handlers for profile onboarding and skill points.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{current_user, AuthUser};
use crate::errors::AppError;
use crate::models::user::{ExperienceLevel, JobRole, SkillType, UserRow};
use crate::state::AppState;
use crate::users::service::{self, ProfileUpdate};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub roles: Vec<JobRole>,
    #[serde(default)]
    pub skills: Vec<SkillType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub experience: Option<ExperienceLevel>,
    #[serde(default)]
    pub roles: Vec<JobRole>,
    #[serde(default)]
    pub skills: Vec<SkillType>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: UserRow,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckProfileResponse {
    pub is_complete: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSkillPointsRequest {
    pub skill: SkillType,
    pub points_to_add: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillPointsRequest {
    pub skill: SkillType,
    pub points: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPointsResponse {
    pub success: bool,
    pub skill_points: i32,
    pub total_points: i32,
    pub points_applied: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/user/complete-profile
///
/// Onboarding submission: name, email, experience, 1-3 roles, 1+ skills.
pub async fn handle_complete_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CompleteProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let (full_name, email, experience) = match (req.full_name, req.email, req.experience) {
        (Some(name), Some(email), Some(exp)) => (name, email, exp),
        _ => {
            return Err(AppError::Validation(
                "Full name, email, and experience are required".to_string(),
            ))
        }
    };

    let user = current_user(&state.db, &auth.clerk_id).await?;
    let user = service::apply_profile(
        &state.db,
        user.id,
        ProfileUpdate {
            full_name,
            email: Some(email),
            experience,
            roles: req.roles,
            skills: req.skills,
        },
    )
    .await?;

    Ok(Json(ProfileResponse {
        success: true,
        user,
    }))
}

/// PUT /api/v1/user/update-profile
///
/// Same shape as onboarding minus the email, which stays as stored.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let (full_name, experience) = match (req.full_name, req.experience) {
        (Some(name), Some(exp)) => (name, exp),
        _ => {
            return Err(AppError::Validation(
                "Full name and experience are required".to_string(),
            ))
        }
    };

    let user = current_user(&state.db, &auth.clerk_id).await?;
    let user = service::apply_profile(
        &state.db,
        user.id,
        ProfileUpdate {
            full_name,
            email: None,
            experience,
            roles: req.roles,
            skills: req.skills,
        },
    )
    .await?;

    Ok(Json(ProfileResponse {
        success: true,
        user,
    }))
}

/// GET /api/v1/user/check-profile
///
/// Anonymous callers are simply incomplete, not unauthorized: the gateway
/// polls this before routing to onboarding.
pub async fn handle_check_profile(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
) -> Result<Json<CheckProfileResponse>, AppError> {
    let is_complete = match auth {
        Some(auth) => service::is_profile_complete(&state.db, &auth.clerk_id).await?,
        None => false,
    };
    Ok(Json(CheckProfileResponse { is_complete }))
}

/// POST /api/v1/user/add-skill-points
pub async fn handle_add_skill_points(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<AddSkillPointsRequest>,
) -> Result<Json<SkillPointsResponse>, AppError> {
    let user = current_user(&state.db, &auth.clerk_id).await?;
    let outcome =
        service::add_skill_points(&state.db, user.id, req.skill, req.points_to_add).await?;

    Ok(Json(SkillPointsResponse {
        success: true,
        skill_points: outcome.skill_points,
        total_points: outcome.total_points,
        points_applied: outcome.points_applied,
    }))
}

/// POST /api/v1/user/update-skill-points
pub async fn handle_update_skill_points(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateSkillPointsRequest>,
) -> Result<Json<SkillPointsResponse>, AppError> {
    let user = current_user(&state.db, &auth.clerk_id).await?;
    let outcome = service::set_skill_points(&state.db, user.id, req.skill, req.points).await?;

    Ok(Json(SkillPointsResponse {
        success: true,
        skill_points: outcome.skill_points,
        total_points: outcome.total_points,
        points_applied: outcome.points_applied,
    }))
}

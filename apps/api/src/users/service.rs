//! Profile and skill-score persistence.
//!
//! Skill-point mutations propagate their *delta* to the user's aggregate
//! total inside the same transaction, so ledger-earned points are never
//! clobbered by a recompute.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{ExperienceLevel, JobRole, SkillType, UserRow};

/// Cap on job roles selectable during onboarding.
pub const MAX_PROFILE_ROLES: usize = 3;

/// A validated onboarding or profile-update submission.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub full_name: String,
    /// `None` leaves the stored email untouched (profile update flow).
    pub email: Option<String>,
    pub experience: ExperienceLevel,
    pub roles: Vec<JobRole>,
    pub skills: Vec<SkillType>,
}

/// Result of a skill-point mutation.
#[derive(Debug)]
pub struct SkillPointsOutcome {
    pub skill_points: i32,
    pub total_points: i32,
    /// Delta actually applied to the aggregate total after clamping.
    pub points_applied: i32,
}

pub fn validate_profile(update: &ProfileUpdate) -> Result<(), AppError> {
    if update.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".to_string()));
    }
    if update.roles.is_empty() {
        return Err(AppError::Validation(
            "At least one job role is required".to_string(),
        ));
    }
    if update.roles.len() > MAX_PROFILE_ROLES {
        return Err(AppError::Validation(format!(
            "Maximum {MAX_PROFILE_ROLES} job roles allowed"
        )));
    }
    if update.skills.is_empty() {
        return Err(AppError::Validation(
            "At least one skill is required".to_string(),
        ));
    }
    Ok(())
}

/// Applies a profile submission: updates the user row and replaces the role
/// and skill-score sets (fresh skills start at zero points), all in one
/// transaction.
pub async fn apply_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: ProfileUpdate,
) -> Result<UserRow, AppError> {
    validate_profile(&update)?;

    let mut tx = pool.begin().await?;

    let user: UserRow = sqlx::query_as(
        "UPDATE users
         SET full_name = $1, email = COALESCE($2, email), experience = $3, updated_at = now()
         WHERE id = $4
         RETURNING *",
    )
    .bind(update.full_name.trim())
    .bind(update.email.as_deref().map(str::trim))
    .bind(update.experience.as_str())
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    for role in &update.roles {
        sqlx::query("INSERT INTO user_roles (user_id, role) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(user_id)
            .bind(role.as_str())
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query("DELETE FROM skill_scores WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    for skill in &update.skills {
        sqlx::query(
            "INSERT INTO skill_scores (user_id, skill, points) VALUES ($1, $2, 0)
             ON CONFLICT (user_id, skill) DO NOTHING",
        )
        .bind(user_id)
        .bind(skill.as_str())
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(user)
}

/// Adds (or subtracts) points on one skill, clamping the skill at zero, and
/// moves the applied delta onto the user's aggregate total.
pub async fn add_skill_points(
    pool: &PgPool,
    user_id: Uuid,
    skill: SkillType,
    points_to_add: i32,
) -> Result<SkillPointsOutcome, AppError> {
    let mut tx = pool.begin().await?;

    let current: Option<i32> =
        sqlx::query_scalar("SELECT points FROM skill_scores WHERE user_id = $1 AND skill = $2 FOR UPDATE")
            .bind(user_id)
            .bind(skill.as_str())
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.unwrap_or(0);
    let new_points = (current + points_to_add).max(0);

    let outcome = write_skill_points(&mut tx, user_id, skill, current, new_points).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// Sets one skill's points to an absolute value and moves the resulting
/// delta onto the user's aggregate total.
pub async fn set_skill_points(
    pool: &PgPool,
    user_id: Uuid,
    skill: SkillType,
    points: i32,
) -> Result<SkillPointsOutcome, AppError> {
    if points < 0 {
        return Err(AppError::Validation(
            "Points must be a positive number".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let current: Option<i32> =
        sqlx::query_scalar("SELECT points FROM skill_scores WHERE user_id = $1 AND skill = $2 FOR UPDATE")
            .bind(user_id)
            .bind(skill.as_str())
            .fetch_optional(&mut *tx)
            .await?;
    let current = current.unwrap_or(0);

    let outcome = write_skill_points(&mut tx, user_id, skill, current, points).await?;
    tx.commit().await?;
    Ok(outcome)
}

/// Whether the user has finished onboarding: name, experience, at least one
/// role and one skill. Unknown users are simply incomplete.
pub async fn is_profile_complete(pool: &PgPool, clerk_id: &str) -> Result<bool, AppError> {
    let complete: Option<bool> = sqlx::query_scalar(
        "SELECT u.full_name IS NOT NULL AND u.full_name <> ''
                AND u.experience IS NOT NULL
                AND EXISTS (SELECT 1 FROM user_roles r WHERE r.user_id = u.id)
                AND EXISTS (SELECT 1 FROM skill_scores s WHERE s.user_id = u.id)
         FROM users u WHERE u.clerk_id = $1",
    )
    .bind(clerk_id)
    .fetch_optional(pool)
    .await?;
    Ok(complete.unwrap_or(false))
}

async fn write_skill_points(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    user_id: Uuid,
    skill: SkillType,
    current: i32,
    new_points: i32,
) -> Result<SkillPointsOutcome, AppError> {
    let applied = new_points - current;

    sqlx::query(
        "INSERT INTO skill_scores (user_id, skill, points) VALUES ($1, $2, $3)
         ON CONFLICT (user_id, skill) DO UPDATE SET points = EXCLUDED.points",
    )
    .bind(user_id)
    .bind(skill.as_str())
    .bind(new_points)
    .execute(&mut **tx)
    .await?;

    let total_points: i32 = sqlx::query_scalar(
        "UPDATE users SET total_points = total_points + $1, updated_at = now()
         WHERE id = $2
         RETURNING total_points",
    )
    .bind(applied)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(SkillPointsOutcome {
        skill_points: new_points,
        total_points,
        points_applied: applied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(roles: usize, skills: usize) -> ProfileUpdate {
        ProfileUpdate {
            full_name: "Jane Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            experience: ExperienceLevel::Junior,
            roles: vec![JobRole::Backend; roles],
            skills: vec![SkillType::Dsa; skills],
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(validate_profile(&update(2, 3)).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut u = update(1, 1);
        u.full_name = "   ".to_string();
        assert!(matches!(
            validate_profile(&u),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_roles_required_and_capped() {
        assert!(validate_profile(&update(0, 1)).is_err());
        assert!(validate_profile(&update(3, 1)).is_ok());
        assert!(validate_profile(&update(4, 1)).is_err());
    }

    #[test]
    fn test_skills_required() {
        assert!(validate_profile(&update(1, 0)).is_err());
    }
}

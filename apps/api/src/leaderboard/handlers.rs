//! Axum route handlers for the Leaderboard API.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::leaderboard::aggregate::{
    completed_task_count, page_with_pinned, rank_entries, LeaderboardEntry, SkillPoints,
    SortMeasure,
};
use crate::leaderboard::chat::{
    build_coach_system_prompt, CHAT_MAX_TOKENS, CHAT_TEMPERATURE,
};
use crate::llm_client::{CallOptions, ChatMessage};
use crate::models::user::{SkillScoreRow, SkillType, UserRoleRow, UserRow};
use crate::state::AppState;

const DEFAULT_PER_PAGE: usize = 20;
const MAX_PER_PAGE: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub sort_by: Option<String>,
    pub skill: Option<SkillType>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub users: Vec<LeaderboardEntry>,
    pub total_users: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub current_user: Option<LeaderboardEntry>,
    pub users_ahead: usize,
    pub users_behind: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/leaderboard
///
/// Ranked users under the selected measure. Works anonymously; with an
/// identity header the caller's row is pinned to the top of the page.
pub async fn handle_get_leaderboard(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>, AppError> {
    let measure = parse_measure(&query)?;
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
    let page = query.page.unwrap_or(1).max(1);

    let entries = assemble_entries(&state).await?;
    let ranked = rank_entries(entries, measure);

    let current_user_id = match auth {
        Some(auth) => ranked
            .iter()
            .find(|e| e.clerk_id == auth.clerk_id)
            .map(|e| e.user_id),
        None => None,
    };

    let total_users = ranked.len();
    let total_pages = total_users.div_ceil(per_page);
    let current_user = current_user_id
        .and_then(|uid| ranked.iter().find(|e| e.user_id == uid))
        .cloned();
    let (users_ahead, users_behind) = current_user
        .as_ref()
        .map(|me| (me.rank - 1, total_users - me.rank))
        .unwrap_or((0, 0));

    let users = page_with_pinned(&ranked, current_user_id, page, per_page);

    Ok(Json(LeaderboardResponse {
        users,
        total_users,
        total_pages,
        current_page: page,
        current_user,
        users_ahead,
        users_behind,
    }))
}

/// POST /api/v1/leaderboard/chat
///
/// Career-coach chat grounded in a snapshot of the ranked board.
pub async fn handle_leaderboard_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.messages.is_empty() {
        return Err(AppError::Validation("messages cannot be empty".to_string()));
    }

    let entries = assemble_entries(&state).await?;
    let ranked = rank_entries(entries, SortMeasure::TotalPoints);
    let system = build_coach_system_prompt(&ranked, ranked.len());

    let message = state
        .llm
        .chat(
            &system,
            &req.messages,
            CallOptions {
                max_tokens: Some(CHAT_MAX_TOKENS),
                temperature: CHAT_TEMPERATURE,
                json_mode: false,
            },
        )
        .await
        .map_err(|e| AppError::Llm(format!("Leaderboard chat failed: {e}")))?;

    Ok(Json(ChatResponse { message }))
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Fetches users plus their roles, skill scores, and cumulative daily-task
/// points, in the deterministic base order ties fall back to.
async fn assemble_entries(state: &AppState) -> Result<Vec<LeaderboardEntry>, AppError> {
    let users: Vec<UserRow> =
        sqlx::query_as("SELECT * FROM users ORDER BY total_points DESC, created_at ASC")
            .fetch_all(&state.db)
            .await?;

    let roles: Vec<UserRoleRow> = sqlx::query_as("SELECT user_id, role FROM user_roles")
        .fetch_all(&state.db)
        .await?;

    let skills: Vec<SkillScoreRow> = sqlx::query_as("SELECT * FROM skill_scores")
        .fetch_all(&state.db)
        .await?;

    let daily: Vec<(Uuid, i64)> = sqlx::query_as(
        "SELECT user_id, COALESCE(SUM(total_points), 0) FROM daily_tasks GROUP BY user_id",
    )
    .fetch_all(&state.db)
    .await?;

    let mut roles_by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
    for row in roles {
        roles_by_user.entry(row.user_id).or_default().push(row.role);
    }

    let mut skills_by_user: HashMap<Uuid, Vec<SkillPoints>> = HashMap::new();
    for row in skills {
        skills_by_user.entry(row.user_id).or_default().push(SkillPoints {
            skill: row.skill,
            points: row.points,
        });
    }

    let daily_by_user: HashMap<Uuid, i64> = daily.into_iter().collect();

    Ok(users
        .into_iter()
        .map(|user| {
            let daily_task_points = daily_by_user.get(&user.id).copied().unwrap_or(0) as i32;
            LeaderboardEntry {
                rank: 0, // assigned by rank_entries
                user_id: user.id,
                clerk_id: user.clerk_id,
                full_name: user.full_name.unwrap_or_else(|| "Anonymous".to_string()),
                email: user.email.unwrap_or_default(),
                total_points: user.total_points,
                daily_task_points,
                completed_daily_tasks: completed_task_count(daily_task_points),
                roles: roles_by_user.remove(&user.id).unwrap_or_default(),
                skills: skills_by_user.remove(&user.id).unwrap_or_default(),
            }
        })
        .collect())
}

fn parse_measure(query: &LeaderboardQuery) -> Result<SortMeasure, AppError> {
    match query.sort_by.as_deref() {
        None | Some("total") => Ok(SortMeasure::TotalPoints),
        Some("dailyTasks") => Ok(SortMeasure::DailyTaskPoints),
        Some("skill") => query.skill.map(SortMeasure::Skill).ok_or_else(|| {
            AppError::Validation("skill parameter is required when sorting by skill".to_string())
        }),
        Some(other) => Err(AppError::Validation(format!(
            "Unknown sort measure '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(sort_by: Option<&str>, skill: Option<SkillType>) -> LeaderboardQuery {
        LeaderboardQuery {
            sort_by: sort_by.map(String::from),
            skill,
            page: None,
            per_page: None,
        }
    }

    #[test]
    fn test_parse_measure_defaults_to_total() {
        assert_eq!(
            parse_measure(&query(None, None)).unwrap(),
            SortMeasure::TotalPoints
        );
    }

    #[test]
    fn test_parse_measure_skill_requires_skill_param() {
        assert!(parse_measure(&query(Some("skill"), None)).is_err());
        assert_eq!(
            parse_measure(&query(Some("skill"), Some(SkillType::Dsa))).unwrap(),
            SortMeasure::Skill(SkillType::Dsa)
        );
    }

    #[test]
    fn test_parse_measure_rejects_unknown() {
        assert!(parse_measure(&query(Some("charisma"), None)).is_err());
    }
}

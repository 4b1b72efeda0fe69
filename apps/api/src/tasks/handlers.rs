//! Axum route handlers for the Daily Task API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{current_user, AuthUser};
use crate::errors::AppError;
use crate::models::tasks::{DailyTaskRow, SubTask};
use crate::state::AppState;
use crate::tasks::service;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub success: bool,
    pub tasks: Vec<SubTask>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskRequest {
    pub entry_id: Uuid,
    pub sub_task_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskResponse {
    pub success: bool,
    pub points_earned: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditTaskRequest {
    pub entry_id: Uuid,
    pub sub_task_id: Uuid,
    pub new_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTaskRequest {
    pub entry_id: Uuid,
    pub sub_task_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayViewResponse {
    pub today_entry: Option<DailyTaskRow>,
    pub tasks: Vec<SubTask>,
    pub can_create_more: bool,
    pub history: Vec<DailyTaskRow>,
    pub total_points: i32,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/daily-tasks
///
/// Today's entry, the cap indicator, and the last 10 frozen history entries.
pub async fn handle_get_daily_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<TodayViewResponse>, AppError> {
    let user = current_user(&state.db, &auth.clerk_id).await?;
    let view = service::today_view(&state.db, state.day_window(), &user).await?;

    Ok(Json(TodayViewResponse {
        today_entry: view.today_entry,
        tasks: view.tasks,
        can_create_more: view.can_create_more,
        history: view.history,
        total_points: view.total_points,
    }))
}

/// POST /api/v1/daily-tasks/create
pub async fn handle_create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<Json<CreateTaskResponse>, AppError> {
    let user = current_user(&state.db, &auth.clerk_id).await?;
    let tasks = service::add_sub_task(&state.db, state.day_window(), user.id, &req.title).await?;

    Ok(Json(CreateTaskResponse {
        success: true,
        tasks,
    }))
}

/// POST /api/v1/daily-tasks/complete
///
/// Awards the fixed per-task points to the entry and the user atomically.
pub async fn handle_complete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CompleteTaskRequest>,
) -> Result<Json<CompleteTaskResponse>, AppError> {
    current_user(&state.db, &auth.clerk_id).await?;
    let points_earned =
        service::complete_sub_task(&state.db, state.day_window(), req.entry_id, req.sub_task_id)
            .await?;

    Ok(Json(CompleteTaskResponse {
        success: true,
        points_earned,
    }))
}

/// POST /api/v1/daily-tasks/edit
pub async fn handle_edit_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<EditTaskRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    current_user(&state.db, &auth.clerk_id).await?;
    service::edit_sub_task(
        &state.db,
        state.day_window(),
        req.entry_id,
        req.sub_task_id,
        &req.new_title,
    )
    .await?;

    Ok(Json(SuccessResponse { success: true }))
}

/// POST /api/v1/daily-tasks/delete
pub async fn handle_delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<DeleteTaskRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    current_user(&state.db, &auth.clerk_id).await?;
    service::delete_sub_task(&state.db, state.day_window(), req.entry_id, req.sub_task_id).await?;

    Ok(Json(SuccessResponse { success: true }))
}

pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::leaderboard;
use crate::resume;
use crate::state::AppState;
use crate::tasks;
use crate::users;
use crate::webhook;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Daily tasks
        .route(
            "/api/v1/daily-tasks",
            get(tasks::handlers::handle_get_daily_tasks),
        )
        .route(
            "/api/v1/daily-tasks/create",
            post(tasks::handlers::handle_create_task),
        )
        .route(
            "/api/v1/daily-tasks/complete",
            post(tasks::handlers::handle_complete_task),
        )
        .route(
            "/api/v1/daily-tasks/edit",
            post(tasks::handlers::handle_edit_task),
        )
        .route(
            "/api/v1/daily-tasks/delete",
            post(tasks::handlers::handle_delete_task),
        )
        // Leaderboard
        .route(
            "/api/v1/leaderboard",
            get(leaderboard::handlers::handle_get_leaderboard),
        )
        .route(
            "/api/v1/leaderboard/chat",
            post(leaderboard::handlers::handle_leaderboard_chat),
        )
        // Resume analysis
        .route(
            "/api/v1/resume/analyse",
            post(resume::handlers::handle_analyse_resume),
        )
        // Profile & skill points
        .route(
            "/api/v1/user/check-profile",
            get(users::handlers::handle_check_profile),
        )
        .route(
            "/api/v1/user/complete-profile",
            post(users::handlers::handle_complete_profile),
        )
        .route(
            "/api/v1/user/update-profile",
            put(users::handlers::handle_update_profile),
        )
        .route(
            "/api/v1/user/add-skill-points",
            post(users::handlers::handle_add_skill_points),
        )
        .route(
            "/api/v1/user/update-skill-points",
            post(users::handlers::handle_update_skill_points),
        )
        // Clerk webhook
        .route(
            "/api/v1/webhook/clerk",
            post(webhook::handlers::handle_clerk_webhook),
        )
        .with_state(state)
}

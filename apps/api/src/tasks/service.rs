//! SQL orchestration for the daily ledger.
//!
//! Every mutation runs in a transaction that first acquires the target entry
//! row with `SELECT ... FOR UPDATE`, serializing read-modify-write cycles on
//! the embedded task array. Two concurrent completions of different
//! sub-tasks in the same entry therefore cannot lose each other's write.

use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::tasks::{DailyTaskRow, SubTask};
use crate::models::user::UserRow;
use crate::tasks::day_window::DayWindow;
use crate::tasks::subtasks::{self, MAX_TASKS_PER_DAY};

/// Past entries shown in the daily-tasks view.
const HISTORY_LIMIT: i64 = 10;

/// Today's ledger state plus frozen history, as consumed by the dashboard.
#[derive(Debug)]
pub struct TodayView {
    pub today_entry: Option<DailyTaskRow>,
    pub tasks: Vec<SubTask>,
    pub can_create_more: bool,
    pub history: Vec<DailyTaskRow>,
    pub total_points: i32,
}

/// Appends a sub-task to today's entry, creating the entry lazily on the
/// first add of the day. Returns the updated task list.
pub async fn add_sub_task(
    pool: &PgPool,
    window: DayWindow,
    user_id: Uuid,
    title: &str,
) -> Result<Vec<SubTask>, AppError> {
    let mut tx = pool.begin().await?;

    let entry: Option<DailyTaskRow> = sqlx::query_as(
        "SELECT * FROM daily_tasks
         WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
         FOR UPDATE",
    )
    .bind(user_id)
    .bind(window.start)
    .bind(window.end)
    .fetch_optional(&mut *tx)
    .await?;

    let tasks = match entry {
        Some(entry) => {
            let mut tasks = entry.tasks.0;
            subtasks::add_task(&mut tasks, title)?;
            sqlx::query("UPDATE daily_tasks SET tasks = $1 WHERE id = $2")
                .bind(Json(&tasks))
                .bind(entry.id)
                .execute(&mut *tx)
                .await?;
            tasks
        }
        None => {
            let mut tasks = Vec::new();
            subtasks::add_task(&mut tasks, title)?;
            sqlx::query("INSERT INTO daily_tasks (user_id, tasks, total_points) VALUES ($1, $2, 0)")
                .bind(user_id)
                .bind(Json(&tasks))
                .execute(&mut *tx)
                .await?;
            info!("Created daily ledger entry for user {user_id}");
            tasks
        }
    };

    tx.commit().await?;
    Ok(tasks)
}

/// Marks a sub-task completed and moves the award to both the entry's total
/// and the owning user's aggregate total. Both increments commit in the same
/// transaction or not at all.
pub async fn complete_sub_task(
    pool: &PgPool,
    window: DayWindow,
    entry_id: Uuid,
    sub_task_id: Uuid,
) -> Result<i32, AppError> {
    let mut tx = pool.begin().await?;

    let entry = lock_entry(&mut tx, entry_id, window).await?;
    let mut tasks = entry.tasks.0;
    let points = subtasks::complete_task(&mut tasks, sub_task_id)?;
    debug_assert_eq!(entry.total_points + points, subtasks::earned_points(&tasks));

    sqlx::query("UPDATE daily_tasks SET tasks = $1, total_points = total_points + $2 WHERE id = $3")
        .bind(Json(&tasks))
        .bind(points)
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE users SET total_points = total_points + $1, updated_at = now() WHERE id = $2")
        .bind(points)
        .bind(entry.user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(points)
}

/// Replaces a pending sub-task's title.
pub async fn edit_sub_task(
    pool: &PgPool,
    window: DayWindow,
    entry_id: Uuid,
    sub_task_id: Uuid,
    new_title: &str,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let entry = lock_entry(&mut tx, entry_id, window).await?;
    let mut tasks = entry.tasks.0;
    subtasks::edit_task(&mut tasks, sub_task_id, new_title)?;

    sqlx::query("UPDATE daily_tasks SET tasks = $1 WHERE id = $2")
        .bind(Json(&tasks))
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Removes a pending sub-task. The entry's points are untouched.
pub async fn delete_sub_task(
    pool: &PgPool,
    window: DayWindow,
    entry_id: Uuid,
    sub_task_id: Uuid,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let entry = lock_entry(&mut tx, entry_id, window).await?;
    let mut tasks = entry.tasks.0;
    subtasks::delete_task(&mut tasks, sub_task_id)?;

    sqlx::query("UPDATE daily_tasks SET tasks = $1 WHERE id = $2")
        .bind(Json(&tasks))
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Today's entry (if any), the cap indicator, and the most recent frozen
/// history entries, newest first.
pub async fn today_view(
    pool: &PgPool,
    window: DayWindow,
    user: &UserRow,
) -> Result<TodayView, AppError> {
    let today_entry: Option<DailyTaskRow> = sqlx::query_as(
        "SELECT * FROM daily_tasks
         WHERE user_id = $1 AND created_at >= $2 AND created_at < $3",
    )
    .bind(user.id)
    .bind(window.start)
    .bind(window.end)
    .fetch_optional(pool)
    .await?;

    let history: Vec<DailyTaskRow> = sqlx::query_as(
        "SELECT * FROM daily_tasks
         WHERE user_id = $1 AND created_at < $2
         ORDER BY created_at DESC
         LIMIT $3",
    )
    .bind(user.id)
    .bind(window.start)
    .bind(HISTORY_LIMIT)
    .fetch_all(pool)
    .await?;

    let tasks = today_entry
        .as_ref()
        .map(|e| e.tasks.0.clone())
        .unwrap_or_default();
    let can_create_more = tasks.len() < MAX_TASKS_PER_DAY;

    Ok(TodayView {
        today_entry,
        tasks,
        can_create_more,
        history,
        total_points: user.total_points,
    })
}

/// Fetches and row-locks an entry, rejecting targets outside the current day
/// window: once the day boundary passes, an entry is frozen history.
async fn lock_entry(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    entry_id: Uuid,
    window: DayWindow,
) -> Result<DailyTaskRow, AppError> {
    let entry: DailyTaskRow = sqlx::query_as("SELECT * FROM daily_tasks WHERE id = $1 FOR UPDATE")
        .bind(entry_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Entry not found".to_string()))?;

    if !window.contains(entry.created_at) {
        return Err(AppError::Validation(
            "Past day entries are read-only".to_string(),
        ));
    }

    Ok(entry)
}

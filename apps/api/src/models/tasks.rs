use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One user's task list for one calendar day.
///
/// Sub-tasks live in the `tasks` JSONB column as an ordered array, capped at
/// three entries. `total_points` only ever grows, by the fixed award on each
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyTaskRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tasks: Json<Vec<SubTask>>,
    pub total_points: i32,
    pub created_at: DateTime<Utc>,
}

/// An individual goal inside a daily ledger entry.
///
/// `completed` is a one-way transition; once true, the title is frozen and
/// the sub-task can no longer be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

//! Pure sub-task state machine, factored out of the SQL layer so every
//! transition and cap is unit-testable without a database.
//!
//! States per sub-task: `pending -> completed`, one-way. A completed
//! sub-task's title is frozen and it cannot be deleted.

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::tasks::SubTask;

/// Points awarded for each completed sub-task. Policy lives here, not in the
/// transaction logic.
pub const POINTS_PER_TASK: i32 = 3;

/// Cap on sub-tasks per ledger entry (and therefore per user per day).
pub const MAX_TASKS_PER_DAY: usize = 3;

/// Appends a new pending sub-task, enforcing the daily cap.
/// The title is trimmed; an empty result is a validation error.
pub fn add_task(tasks: &mut Vec<SubTask>, title: &str) -> Result<SubTask, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title required".to_string()));
    }
    if tasks.len() >= MAX_TASKS_PER_DAY {
        return Err(AppError::LimitExceeded);
    }

    let task = SubTask {
        id: Uuid::new_v4(),
        title: title.to_string(),
        completed: false,
    };
    tasks.push(task.clone());
    Ok(task)
}

/// Marks a sub-task completed and returns the points awarded.
/// Repeated completion attempts are rejected, not treated as no-ops.
pub fn complete_task(tasks: &mut [SubTask], sub_task_id: Uuid) -> Result<i32, AppError> {
    let task = find_task(tasks, sub_task_id)?;
    if task.completed {
        return Err(AppError::AlreadyCompleted);
    }
    task.completed = true;
    Ok(POINTS_PER_TASK)
}

/// Replaces a pending sub-task's title in place.
pub fn edit_task(tasks: &mut [SubTask], sub_task_id: Uuid, new_title: &str) -> Result<(), AppError> {
    let new_title = new_title.trim();
    if new_title.is_empty() {
        return Err(AppError::Validation("Title cannot be empty".to_string()));
    }
    let task = find_task(tasks, sub_task_id)?;
    if task.completed {
        return Err(AppError::CannotEditCompleted);
    }
    task.title = new_title.to_string();
    Ok(())
}

/// Removes a pending sub-task. Points are unaffected; pending tasks never
/// contributed any.
pub fn delete_task(tasks: &mut Vec<SubTask>, sub_task_id: Uuid) -> Result<(), AppError> {
    let idx = tasks
        .iter()
        .position(|t| t.id == sub_task_id)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))?;
    if tasks[idx].completed {
        return Err(AppError::CannotDeleteCompleted);
    }
    tasks.remove(idx);
    Ok(())
}

/// Points the task list should have earned: the award times the completed
/// count. The entry's stored `total_points` must always equal this.
pub fn earned_points(tasks: &[SubTask]) -> i32 {
    let completed = tasks.iter().filter(|t| t.completed).count();
    POINTS_PER_TASK * completed as i32
}

fn find_task(tasks: &mut [SubTask], sub_task_id: Uuid) -> Result<&mut SubTask, AppError> {
    tasks
        .iter_mut()
        .find(|t| t.id == sub_task_id)
        .ok_or_else(|| AppError::NotFound("Task not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(tasks: &mut Vec<SubTask>, title: &str) -> SubTask {
        add_task(tasks, title).unwrap()
    }

    #[test]
    fn test_add_trims_title() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "  Finish chapter 3  ");
        assert_eq!(task.title, "Finish chapter 3");
        assert!(!task.completed);
    }

    #[test]
    fn test_add_rejects_whitespace_title() {
        let mut tasks = Vec::new();
        assert!(matches!(
            add_task(&mut tasks, "   "),
            Err(AppError::Validation(_))
        ));
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_fourth_add_hits_daily_limit() {
        let mut tasks = Vec::new();
        add(&mut tasks, "Task A");
        add(&mut tasks, "Task B");
        add(&mut tasks, "Task C");
        assert!(matches!(
            add_task(&mut tasks, "Task D"),
            Err(AppError::LimitExceeded)
        ));
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn test_complete_awards_fixed_points() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "Finish chapter 3");
        let points = complete_task(&mut tasks, task.id).unwrap();
        assert_eq!(points, POINTS_PER_TASK);
        assert!(tasks[0].completed);
        assert_eq!(earned_points(&tasks), POINTS_PER_TASK);
    }

    #[test]
    fn test_second_complete_is_rejected() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "Draft essay");
        complete_task(&mut tasks, task.id).unwrap();
        assert!(matches!(
            complete_task(&mut tasks, task.id),
            Err(AppError::AlreadyCompleted)
        ));
        // No double award.
        assert_eq!(earned_points(&tasks), POINTS_PER_TASK);
    }

    #[test]
    fn test_complete_unknown_task_is_not_found() {
        let mut tasks = Vec::new();
        add(&mut tasks, "Task A");
        assert!(matches!(
            complete_task(&mut tasks, Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_edit_replaces_title_until_completed() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "Draft essay");
        edit_task(&mut tasks, task.id, "Draft essay v2").unwrap();
        assert_eq!(tasks[0].title, "Draft essay v2");

        complete_task(&mut tasks, task.id).unwrap();
        assert!(matches!(
            edit_task(&mut tasks, task.id, "Draft essay v3"),
            Err(AppError::CannotEditCompleted)
        ));
        assert_eq!(tasks[0].title, "Draft essay v2");
    }

    #[test]
    fn test_edit_rejects_empty_title() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "Task A");
        assert!(matches!(
            edit_task(&mut tasks, task.id, "  "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_pending_leaves_points_untouched() {
        let mut tasks = Vec::new();
        let a = add(&mut tasks, "Task A");
        let b = add(&mut tasks, "Task B");
        complete_task(&mut tasks, a.id).unwrap();

        delete_task(&mut tasks, b.id).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(earned_points(&tasks), POINTS_PER_TASK);
    }

    #[test]
    fn test_delete_completed_is_rejected() {
        let mut tasks = Vec::new();
        let task = add(&mut tasks, "Finish chapter 3");
        complete_task(&mut tasks, task.id).unwrap();
        assert!(matches!(
            delete_task(&mut tasks, task.id),
            Err(AppError::CannotDeleteCompleted)
        ));
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_points_track_completed_count_across_sequences() {
        let mut tasks = Vec::new();
        let a = add(&mut tasks, "Task A");
        let b = add(&mut tasks, "Task B");
        let c = add(&mut tasks, "Task C");

        assert_eq!(earned_points(&tasks), 0);
        complete_task(&mut tasks, a.id).unwrap();
        complete_task(&mut tasks, c.id).unwrap();
        assert_eq!(earned_points(&tasks), 2 * POINTS_PER_TASK);

        // Deleting the remaining pending task changes nothing.
        delete_task(&mut tasks, b.id).unwrap();
        assert_eq!(earned_points(&tasks), 2 * POINTS_PER_TASK);
    }
}

//! Pure ranking and pagination over assembled leaderboard entries.
//!
//! Sorting is a stable descending sort on the selected measure, so ties keep
//! the incoming iteration order. Ranks are positions in the full sorted
//! list; the requesting user's row is pinned to the top of whatever page is
//! served, carrying its true rank.

use serde::Serialize;
use uuid::Uuid;

use crate::models::user::SkillType;
use crate::tasks::subtasks::POINTS_PER_TASK;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillPoints {
    pub skill: String,
    pub points: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: Uuid,
    pub clerk_id: String,
    pub full_name: String,
    pub email: String,
    pub total_points: i32,
    pub daily_task_points: i32,
    pub completed_daily_tasks: i32,
    pub roles: Vec<String>,
    pub skills: Vec<SkillPoints>,
}

/// The point measure the leaderboard is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMeasure {
    TotalPoints,
    DailyTaskPoints,
    Skill(SkillType),
}

/// Each completion awarded a fixed number of points, so the completed count
/// is recoverable from the accumulated daily total.
pub fn completed_task_count(daily_task_points: i32) -> i32 {
    daily_task_points / POINTS_PER_TASK
}

/// Sorts descending by the selected measure (stable, so ties keep input
/// order) and assigns 1-based ranks.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>, measure: SortMeasure) -> Vec<LeaderboardEntry> {
    entries.sort_by_key(|e| std::cmp::Reverse(measure_value(e, measure)));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i + 1;
    }
    entries
}

/// One page of the ranked list with the requesting user's row pinned first,
/// regardless of where their rank falls.
pub fn page_with_pinned(
    ranked: &[LeaderboardEntry],
    current_user_id: Option<Uuid>,
    page: usize,
    per_page: usize,
) -> Vec<LeaderboardEntry> {
    let page = page.max(1);
    let slice: Vec<LeaderboardEntry> = ranked
        .iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    let Some(uid) = current_user_id else {
        return slice;
    };
    let Some(me) = ranked.iter().find(|e| e.user_id == uid) else {
        return slice;
    };

    let mut out = Vec::with_capacity(slice.len() + 1);
    out.push(me.clone());
    out.extend(slice.into_iter().filter(|e| e.user_id != uid));
    out
}

fn measure_value(entry: &LeaderboardEntry, measure: SortMeasure) -> i32 {
    match measure {
        SortMeasure::TotalPoints => entry.total_points,
        SortMeasure::DailyTaskPoints => entry.daily_task_points,
        SortMeasure::Skill(skill) => entry
            .skills
            .iter()
            .find(|s| s.skill == skill.as_str())
            .map(|s| s.points)
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, total: i32, daily: i32, skills: &[(&str, i32)]) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 0,
            user_id: Uuid::new_v4(),
            clerk_id: format!("clerk_{name}"),
            full_name: name.to_string(),
            email: format!("{name}@example.com"),
            total_points: total,
            daily_task_points: daily,
            completed_daily_tasks: completed_task_count(daily),
            roles: vec!["SDE".to_string()],
            skills: skills
                .iter()
                .map(|(s, p)| SkillPoints {
                    skill: (*s).to_string(),
                    points: *p,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rank_by_total_points() {
        let ranked = rank_entries(
            vec![
                entry("bea", 10, 0, &[]),
                entry("ana", 30, 0, &[]),
                entry("cal", 20, 0, &[]),
            ],
            SortMeasure::TotalPoints,
        );
        let names: Vec<&str> = ranked.iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, ["ana", "cal", "bea"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[2].rank, 3);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank_entries(
            vec![
                entry("first", 15, 0, &[]),
                entry("second", 15, 0, &[]),
                entry("third", 15, 0, &[]),
            ],
            SortMeasure::TotalPoints,
        );
        let names: Vec<&str> = ranked.iter().map(|e| e.full_name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_rank_by_skill_treats_missing_as_zero() {
        let ranked = rank_entries(
            vec![
                entry("no_dsa", 100, 0, &[("WEB_DEVELOPMENT", 50)]),
                entry("dsa", 5, 0, &[("DSA", 12)]),
            ],
            SortMeasure::Skill(SkillType::Dsa),
        );
        assert_eq!(ranked[0].full_name, "dsa");
    }

    #[test]
    fn test_rank_by_daily_task_points() {
        let ranked = rank_entries(
            vec![entry("a", 100, 3, &[]), entry("b", 1, 9, &[])],
            SortMeasure::DailyTaskPoints,
        );
        assert_eq!(ranked[0].full_name, "b");
        assert_eq!(ranked[0].completed_daily_tasks, 3);
    }

    #[test]
    fn test_completed_count_floors() {
        assert_eq!(completed_task_count(0), 0);
        assert_eq!(completed_task_count(9), 3);
        // A hand-edited total that is not a multiple still floors cleanly.
        assert_eq!(completed_task_count(10), 3);
    }

    #[test]
    fn test_page_with_pinned_moves_current_user_first() {
        let ranked = rank_entries(
            vec![
                entry("a", 40, 0, &[]),
                entry("b", 30, 0, &[]),
                entry("c", 20, 0, &[]),
                entry("d", 10, 0, &[]),
            ],
            SortMeasure::TotalPoints,
        );
        let me = ranked[3].user_id;
        let page = page_with_pinned(&ranked, Some(me), 1, 2);
        assert_eq!(page[0].full_name, "d");
        assert_eq!(page[0].rank, 4); // true rank, not position on page
        assert_eq!(page[1].full_name, "a");
        assert_eq!(page[2].full_name, "b");
    }

    #[test]
    fn test_page_with_pinned_does_not_duplicate_current_user() {
        let ranked = rank_entries(
            vec![entry("a", 40, 0, &[]), entry("b", 30, 0, &[])],
            SortMeasure::TotalPoints,
        );
        let me = ranked[0].user_id;
        let page = page_with_pinned(&ranked, Some(me), 1, 10);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].full_name, "a");
    }

    #[test]
    fn test_page_without_identity_is_a_plain_slice() {
        let ranked = rank_entries(
            vec![
                entry("a", 40, 0, &[]),
                entry("b", 30, 0, &[]),
                entry("c", 20, 0, &[]),
            ],
            SortMeasure::TotalPoints,
        );
        let page = page_with_pinned(&ranked, None, 2, 2);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].full_name, "c");
    }
}

//! Context assembly for the leaderboard coach chat: the model answers from a
//! snapshot of the ranked board and per-skill leaders baked into the system
//! prompt.

use serde_json::json;

use crate::leaderboard::aggregate::LeaderboardEntry;
use crate::leaderboard::prompts::LEADERBOARD_COACH_SYSTEM;
use crate::models::user::SkillType;

/// Ranked rows included verbatim in the chat context.
pub const CHAT_CONTEXT_USERS: usize = 10;
/// Leaders listed per skill.
pub const CHAT_SKILL_LEADERS: usize = 5;
/// Cap on coach replies.
pub const CHAT_MAX_TOKENS: u32 = 800;
pub const CHAT_TEMPERATURE: f32 = 0.7;

/// Renders the coach system prompt from the ranked board.
pub fn build_coach_system_prompt(entries: &[LeaderboardEntry], total_users: usize) -> String {
    let top: Vec<serde_json::Value> = entries
        .iter()
        .take(CHAT_CONTEXT_USERS)
        .map(|e| {
            json!({
                "rank": e.rank,
                "name": e.full_name,
                "totalPoints": e.total_points,
                "roles": e.roles,
                "skills": e.skills,
            })
        })
        .collect();

    LEADERBOARD_COACH_SYSTEM
        .replace(
            "{leaderboard}",
            &serde_json::to_string_pretty(&top).unwrap_or_default(),
        )
        .replace(
            "{skill_leaders}",
            &serde_json::to_string_pretty(&skill_leaders(entries)).unwrap_or_default(),
        )
        .replace("{total_users}", &total_users.to_string())
}

/// Top scorers per skill, skipping users with zero points in it.
pub fn skill_leaders(entries: &[LeaderboardEntry]) -> serde_json::Value {
    let mut leaders = serde_json::Map::new();
    for skill in SkillType::ALL {
        let mut in_skill: Vec<(&str, i32)> = entries
            .iter()
            .filter_map(|e| {
                e.skills
                    .iter()
                    .find(|s| s.skill == skill.as_str())
                    .map(|s| (e.full_name.as_str(), s.points))
            })
            .filter(|(_, points)| *points > 0)
            .collect();
        in_skill.sort_by_key(|(_, points)| std::cmp::Reverse(*points));

        let top: Vec<serde_json::Value> = in_skill
            .into_iter()
            .take(CHAT_SKILL_LEADERS)
            .map(|(name, points)| json!({ "name": name, "points": points }))
            .collect();
        leaders.insert(skill.as_str().to_string(), serde_json::Value::Array(top));
    }
    serde_json::Value::Object(leaders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::aggregate::SkillPoints;
    use uuid::Uuid;

    fn entry(name: &str, skills: &[(&str, i32)]) -> LeaderboardEntry {
        LeaderboardEntry {
            rank: 1,
            user_id: Uuid::new_v4(),
            clerk_id: format!("clerk_{name}"),
            full_name: name.to_string(),
            email: String::new(),
            total_points: 0,
            daily_task_points: 0,
            completed_daily_tasks: 0,
            roles: Vec::new(),
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
    fn test_skill_leaders_sorted_and_zero_filtered() {
        let entries = vec![
            entry("ana", &[("DSA", 5)]),
            entry("bea", &[("DSA", 12)]),
            entry("cal", &[("DSA", 0)]),
        ];
        let leaders = skill_leaders(&entries);
        let dsa = leaders["DSA"].as_array().unwrap();
        assert_eq!(dsa.len(), 2);
        assert_eq!(dsa[0]["name"], "bea");
        assert_eq!(dsa[1]["name"], "ana");
    }

    #[test]
    fn test_skill_leaders_lists_every_skill() {
        let leaders = skill_leaders(&[]);
        for skill in SkillType::ALL {
            assert!(leaders[skill.as_str()].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_coach_prompt_substitutes_placeholders() {
        let entries = vec![entry("ana", &[("SQL", 7)])];
        let prompt = build_coach_system_prompt(&entries, 42);
        assert!(prompt.contains("\"name\": \"ana\""));
        assert!(prompt.contains("TOTAL USERS IN DATABASE: 42"));
        assert!(!prompt.contains("{leaderboard}"));
        assert!(!prompt.contains("{total_users}"));
    }
}

//! Weekly goal rings.

use serde::{Deserialize, Serialize};

use crate::aggregate::WeeklySummary;
use crate::model::SkillType;

/// Weekly XP targets. Consistency has no ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyGoals {
    pub prospecting: u64,
    pub follow_up: u64,
    pub market_knowledge: u64,
}

impl Default for WeeklyGoals {
    fn default() -> Self {
        Self {
            prospecting: 250,
            follow_up: 400,
            market_knowledge: 200,
        }
    }
}

/// Progress toward one skill's weekly target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalRing {
    pub skill: SkillType,
    pub earned: u64,
    pub goal: u64,
    /// Capped at 100 even when the goal is exceeded.
    pub percent: u32,
    pub complete: bool,
}

impl WeeklyGoals {
    pub fn goal(&self, skill: SkillType) -> Option<u64> {
        match skill {
            SkillType::Prospecting => Some(self.prospecting),
            SkillType::FollowUp => Some(self.follow_up),
            SkillType::MarketKnowledge => Some(self.market_knowledge),
            SkillType::Consistency => None,
        }
    }

    pub fn ring(&self, skill: SkillType, earned: u64) -> Option<GoalRing> {
        let goal = self.goal(skill)?;
        let percent = if goal == 0 {
            100
        } else {
            (earned.saturating_mul(100) / goal).min(100) as u32
        };
        Some(GoalRing {
            skill,
            earned,
            goal,
            percent,
            complete: earned >= goal,
        })
    }

    /// One ring per goal-bearing skill, in display order.
    pub fn rings(&self, summary: &WeeklySummary) -> Vec<GoalRing> {
        SkillType::ALL
            .iter()
            .filter_map(|&skill| self.ring(skill, summary.xp(skill)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::week::WeekKey;

    fn summary(sums: &[(SkillType, u64)]) -> WeeklySummary {
        WeeklySummary {
            week: WeekKey::containing(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()),
            sums: sums.iter().copied().collect::<BTreeMap<_, _>>(),
            followup_count: 0,
            lead_agent_bonuses: 0,
            untimed_skipped: 0,
            unknown_skill_skipped: 0,
        }
    }

    #[test]
    fn default_targets() {
        let goals = WeeklyGoals::default();
        assert_eq!(goals.goal(SkillType::Prospecting), Some(250));
        assert_eq!(goals.goal(SkillType::FollowUp), Some(400));
        assert_eq!(goals.goal(SkillType::MarketKnowledge), Some(200));
        assert_eq!(goals.goal(SkillType::Consistency), None);
    }

    #[test]
    fn rings_skip_consistency_and_cap_percent() {
        let s = summary(&[
            (SkillType::Prospecting, 125),
            (SkillType::FollowUp, 1000),
            (SkillType::Consistency, 300),
        ]);
        let rings = WeeklyGoals::default().rings(&s);
        assert_eq!(rings.len(), 3);

        assert_eq!(rings[0].skill, SkillType::Prospecting);
        assert_eq!(rings[0].percent, 50);
        assert!(!rings[0].complete);

        assert_eq!(rings[1].skill, SkillType::FollowUp);
        assert_eq!(rings[1].percent, 100);
        assert!(rings[1].complete);

        assert_eq!(rings[2].skill, SkillType::MarketKnowledge);
        assert_eq!(rings[2].earned, 0);
        assert_eq!(rings[2].percent, 0);
    }

    #[test]
    fn zero_goal_is_always_complete() {
        let goals = WeeklyGoals {
            prospecting: 0,
            ..WeeklyGoals::default()
        };
        let ring = goals.ring(SkillType::Prospecting, 0).unwrap();
        assert_eq!(ring.percent, 100);
        assert!(ring.complete);
    }
}

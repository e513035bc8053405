//! Weekly XP aggregation over the skill-activity ledger.
//!
//! A pure reducer: the same events, clock and requirements always give the
//! same summary. Re-run it whenever any input changes.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{RecordId, Requirement, SkillActivityEvent, SkillType};
use crate::week::{WeekKey, week_key};

/// Actions that count as a logged follow-up.
pub const DEFAULT_FOLLOW_UP_ACTIONS: &[&str] = &[
    "phone_call",
    "email",
    "email_sent",
    "text_message",
    "meeting",
    "site_visit",
    "follow_up",
];

pub const DEFAULT_LEAD_AGENT_BONUS: u64 = 80;

/// The action code for logging a requirement.
pub const ADD_REQUIREMENT_ACTION: &str = "add_requirement";

/// Tunables for [`WeeklyAggregator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationRules {
    pub follow_up_actions: Vec<String>,
    pub lead_agent_bonus: u64,
}

impl Default for AggregationRules {
    fn default() -> Self {
        Self {
            follow_up_actions: DEFAULT_FOLLOW_UP_ACTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lead_agent_bonus: DEFAULT_LEAD_AGENT_BONUS,
        }
    }
}

/// XP earned in the current week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub week: WeekKey,
    /// Only skills with at least one in-week event have a bucket.
    pub sums: BTreeMap<SkillType, u64>,
    pub followup_count: u32,
    /// In-week requirements that earned the lead-agent bonus.
    pub lead_agent_bonuses: u32,
    /// Events dropped for lacking a usable timestamp.
    pub untimed_skipped: usize,
    /// Events dropped for an unrecognised skill type.
    pub unknown_skill_skipped: usize,
}

impl WeeklySummary {
    pub fn xp(&self, skill: SkillType) -> u64 {
        self.sums.get(&skill).copied().unwrap_or(0)
    }

    pub fn total_xp(&self) -> u64 {
        self.sums.values().fold(0u64, |acc, v| acc.saturating_add(*v))
    }
}

/// Sums in-week XP per skill, applying the follow-up and lead-agent rules.
#[derive(Debug, Clone)]
pub struct WeeklyAggregator {
    tz: Tz,
    rules: AggregationRules,
}

impl WeeklyAggregator {
    pub fn new(tz: Tz, rules: AggregationRules) -> Self {
        Self { tz, rules }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn rules(&self) -> &AggregationRules {
        &self.rules
    }

    fn is_follow_up_action(&self, action: &str) -> bool {
        self.rules.follow_up_actions.iter().any(|a| a == action)
    }

    /// Aggregate the events falling in the week containing `now`.
    pub fn aggregate(
        &self,
        events: &[SkillActivityEvent],
        now: DateTime<Utc>,
        requirements_by_id: &HashMap<RecordId, Requirement>,
    ) -> WeeklySummary {
        let current = week_key(now, self.tz);
        let mut summary = WeeklySummary {
            week: current,
            sums: BTreeMap::new(),
            followup_count: 0,
            lead_agent_bonuses: 0,
            untimed_skipped: 0,
            unknown_skill_skipped: 0,
        };

        for event in events {
            let Some(ts) = event.timestamp else {
                debug!(event_id = %event.id, "skipping activity without timestamp");
                summary.untimed_skipped += 1;
                continue;
            };
            if week_key(ts, self.tz) != current {
                continue;
            }
            let Some(skill) = event.skill_type else {
                debug!(event_id = %event.id, "skipping activity with unknown skill type");
                summary.unknown_skill_skipped += 1;
                continue;
            };

            let mut xp = event.xp_gained;
            match skill {
                SkillType::FollowUp if self.is_follow_up_action(&event.action) => {
                    summary.followup_count += 1;
                }
                SkillType::MarketKnowledge if event.action == ADD_REQUIREMENT_ACTION => {
                    if self.lead_agent_requirement(event, requirements_by_id) {
                        xp = xp.saturating_add(self.rules.lead_agent_bonus);
                        summary.lead_agent_bonuses += 1;
                    }
                }
                _ => {}
            }

            let bucket = summary.sums.entry(skill).or_insert(0);
            *bucket = bucket.saturating_add(xp);
        }

        if summary.untimed_skipped > 0 {
            warn!(
                count = summary.untimed_skipped,
                week = %current,
                "excluded activities without a usable timestamp from weekly totals"
            );
        }

        summary
    }

    fn lead_agent_requirement(
        &self,
        event: &SkillActivityEvent,
        requirements_by_id: &HashMap<RecordId, Requirement>,
    ) -> bool {
        event
            .related_id
            .as_ref()
            .and_then(|id| requirements_by_id.get(id))
            .is_some_and(Requirement::is_lead_agent_eligible)
    }
}

/// Aggregate with the default follow-up whitelist and bonus.
pub fn aggregate_weekly(
    events: &[SkillActivityEvent],
    now: DateTime<Utc>,
    tz: Tz,
    requirements_by_id: &HashMap<RecordId, Requirement>,
) -> WeeklySummary {
    WeeklyAggregator::new(tz, AggregationRules::default()).aggregate(
        events,
        now,
        requirements_by_id,
    )
}

/// Key requirements by id for bonus lookups. Later duplicates win.
pub fn index_requirements(
    requirements: impl IntoIterator<Item = Requirement>,
) -> HashMap<RecordId, Requirement> {
    requirements
        .into_iter()
        .map(|req| (req.id.clone(), req))
        .collect()
}

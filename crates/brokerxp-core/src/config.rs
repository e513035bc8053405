//! Engine configuration shared by every consumer.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::aggregate::{
    AggregationRules, DEFAULT_FOLLOW_UP_ACTIONS, DEFAULT_LEAD_AGENT_BONUS, WeeklyAggregator,
};
use crate::goals::WeeklyGoals;
use crate::week::parse_timezone;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// One set of rules for every page, so week boundaries, the follow-up
/// whitelist and ring targets cannot drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// IANA zone that defines week and day boundaries.
    pub timezone: String,
    pub follow_up_actions: Vec<String>,
    pub lead_agent_bonus: u64,
    pub goals: WeeklyGoals,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            follow_up_actions: DEFAULT_FOLLOW_UP_ACTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lead_agent_bonus: DEFAULT_LEAD_AGENT_BONUS,
            goals: WeeklyGoals::default(),
        }
    }
}

impl EngineConfig {
    /// Check the config and resolve its timezone.
    pub fn validate(&self) -> Result<Tz, CoreError> {
        if let Some(blank) = self.follow_up_actions.iter().position(|a| a.trim().is_empty()) {
            return Err(CoreError::InvalidConfig(format!(
                "follow_up_actions[{blank}] is blank"
            )));
        }
        parse_timezone(&self.timezone)
    }

    pub fn rules(&self) -> AggregationRules {
        AggregationRules {
            follow_up_actions: self.follow_up_actions.clone(),
            lead_agent_bonus: self.lead_agent_bonus,
        }
    }

    pub fn aggregator(&self) -> Result<WeeklyAggregator, CoreError> {
        let tz = self.validate()?;
        Ok(WeeklyAggregator::new(tz, self.rules()))
    }
}

//! Skill leveling engine for the broker prospecting pipeline.
//!
//! Everything in this crate is pure: callers fetch skills, activities and
//! requirements from the backend and hand snapshots in.

pub mod aggregate;
pub mod config;
mod error;
pub mod estimate;
pub mod goals;
pub mod leaderboard;
pub mod level;
pub mod model;
pub mod streak;
pub mod week;

pub use aggregate::{
    AggregationRules, WeeklyAggregator, WeeklySummary, aggregate_weekly, index_requirements,
};
pub use config::EngineConfig;
pub use error::CoreError;
pub use estimate::{ActionEstimate, estimate_actions};
pub use goals::{GoalRing, WeeklyGoals};
pub use leaderboard::{LeaderboardEntry, RankedEntry, rank};
pub use level::{MAX_LEVEL, Progress, level_for_xp, progress, sanitize_xp, xp_for_level};
pub use model::{BrokerSkills, HeaderStats, RecordId, Requirement, SkillActivityEvent, SkillType};
pub use streak::active_day_streak;
pub use week::{WeekKey, parse_timezone, week_key};

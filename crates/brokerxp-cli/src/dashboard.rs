//! Dashboard pipeline: fetch everything, run the engine, hand back one view.

use anyhow::Context;
use brokerxp_core::{
    BrokerSkills, EngineConfig, GoalRing, HeaderStats, WeeklySummary, active_day_streak,
    index_requirements,
};
use brokerxp_sync::ApiClient;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Everything the dashboard prints.
pub struct Dashboard {
    pub skills: BrokerSkills,
    pub summary: WeeklySummary,
    pub rings: Vec<GoalRing>,
    pub header: HeaderStats,
    /// Client-side streak from the activity ledger.
    pub streak_days: u32,
    pub timezone: String,
}

/// Fetch the four backend resources concurrently and derive the weekly view.
pub async fn build_dashboard(
    client: &ApiClient,
    engine: &EngineConfig,
    now: DateTime<Utc>,
) -> anyhow::Result<Dashboard> {
    let aggregator = engine.aggregator().context("engine config")?;

    let (skills, activities, requirements, header) = futures::try_join!(
        client.fetch_skills(),
        client.fetch_activities(),
        client.fetch_requirements(),
        client.fetch_header_stats(),
    )
    .context("fetching dashboard data")?;

    let requirements = index_requirements(requirements);
    let summary = aggregator.aggregate(&activities, now, &requirements);
    let rings = engine.goals.rings(&summary);
    let streak_days = active_day_streak(&activities, now, aggregator.timezone());

    if u64::from(skills.total_level()) != header.total_level {
        warn!(
            client = skills.total_level(),
            server = header.total_level,
            "total level disagrees with header stats"
        );
    }

    Ok(Dashboard {
        skills,
        summary,
        rings,
        header,
        streak_days,
        timezone: engine.timezone.clone(),
    })
}

//! Leaderboard ranking by total level.

use serde::{Deserialize, Serialize};

use crate::model::{BrokerSkills, RecordId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: RecordId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub skills: BrokerSkills,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    /// 1-based; brokers tied on level and XP share a rank.
    pub rank: u32,
    pub total_level: u32,
    pub total_xp: u64,
    pub entry: LeaderboardEntry,
}

/// Order by total level, then total XP (both descending), then name
/// ignoring case.
///
/// Uses competition ranking: two brokers tied for first are both rank 1 and
/// the next broker is rank 3.
pub fn rank(entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    let mut scored: Vec<(u32, u64, LeaderboardEntry)> = entries
        .into_iter()
        .map(|e| (e.skills.total_level(), e.skills.total_xp(), e))
        .collect();
    scored.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.1.cmp(&a.1))
            .then_with(|| {
                let (x, y) = (&a.2.display_name, &b.2.display_name);
                x.to_lowercase()
                    .cmp(&y.to_lowercase())
                    .then_with(|| x.cmp(y))
            })
    });

    let mut ranked: Vec<RankedEntry> = Vec::with_capacity(scored.len());
    for (i, (total_level, total_xp, entry)) in scored.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some(prev) if prev.total_level == total_level && prev.total_xp == total_xp => prev.rank,
            _ => i as u32 + 1,
        };
        ranked.push(RankedEntry {
            rank,
            total_level,
            total_xp,
            entry,
        });
    }
    ranked
}

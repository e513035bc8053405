//! Records consumed from the CRM backend.
//!
//! The backend speaks camelCase JSON and is loose about types: ids arrive as
//! strings or integers, XP sometimes as floats or null, timestamps in a few
//! shapes. Deserialisation here absorbs that so the engine only ever sees
//! clean values.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::level::{level_for_xp, sanitize_xp};

/// The four gamified skill categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkillType {
    Prospecting,
    FollowUp,
    Consistency,
    MarketKnowledge,
}

impl SkillType {
    /// Display order used by every page.
    pub const ALL: [SkillType; 4] = [
        SkillType::Prospecting,
        SkillType::FollowUp,
        SkillType::Consistency,
        SkillType::MarketKnowledge,
    ];

    /// Parse the backend's wire name. Exact match only.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "prospecting" => Some(SkillType::Prospecting),
            "followUp" => Some(SkillType::FollowUp),
            "consistency" => Some(SkillType::Consistency),
            "marketKnowledge" => Some(SkillType::MarketKnowledge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillType::Prospecting => "prospecting",
            SkillType::FollowUp => "followUp",
            SkillType::Consistency => "consistency",
            SkillType::MarketKnowledge => "marketKnowledge",
        }
    }

    /// Human label for cards and tables.
    pub fn label(&self) -> &'static str {
        match self {
            SkillType::Prospecting => "Prospecting",
            SkillType::FollowUp => "Follow Up",
            SkillType::Consistency => "Consistency",
            SkillType::MarketKnowledge => "Market Knowledge",
        }
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier that the backend may send as a string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId(s.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        match Value::deserialize(d)? {
            Value::String(s) => Ok(RecordId(s)),
            Value::Number(n) => Ok(RecordId(n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "expected string or integer id, got {other}"
            ))),
        }
    }
}

/// One gamification-relevant action, as logged by the backend.
///
/// Immutable once created. `timestamp` is `None` when the backend sent
/// nothing usable; such events never count toward a week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillActivityEvent {
    pub id: RecordId,
    /// `None` when the backend sent a skill type this engine does not know.
    #[serde(default, deserialize_with = "lenient_skill")]
    pub skill_type: Option<SkillType>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub xp_gained: u64,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_related_id")]
    pub related_id: Option<RecordId>,
}

/// Cumulative XP per skill for one broker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerSkills {
    #[serde(default, deserialize_with = "lenient_xp")]
    pub prospecting: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub follow_up: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub consistency: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub market_knowledge: u64,
}

impl BrokerSkills {
    pub fn xp(&self, skill: SkillType) -> u64 {
        match skill {
            SkillType::Prospecting => self.prospecting,
            SkillType::FollowUp => self.follow_up,
            SkillType::Consistency => self.consistency,
            SkillType::MarketKnowledge => self.market_knowledge,
        }
    }

    pub fn level(&self, skill: SkillType) -> u32 {
        level_for_xp(self.xp(skill))
    }

    /// Sum of the four per-skill levels.
    pub fn total_level(&self) -> u32 {
        SkillType::ALL.iter().map(|&s| self.level(s)).sum()
    }

    pub fn total_xp(&self) -> u64 {
        SkillType::ALL
            .iter()
            .fold(0u64, |acc, &s| acc.saturating_add(self.xp(s)))
    }

    /// Per-skill levels keyed by skill type.
    pub fn levels(&self) -> BTreeMap<SkillType, u32> {
        SkillType::ALL.iter().map(|&s| (s, self.level(s))).collect()
    }
}

/// A tenant requirement, consulted only for the lead-agent bonus.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: RecordId,
    /// Non-string elements are dropped.
    #[serde(default, deserialize_with = "string_elements")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub is_lead_agent: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub lead_agent: bool,
}

impl Requirement {
    /// A requirement earns the bonus if either flag is set, or any tag
    /// mentions "lead" together with "agent" or "primary".
    pub fn is_lead_agent_eligible(&self) -> bool {
        if self.is_lead_agent || self.lead_agent {
            return true;
        }
        self.tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            tag.contains("lead") && (tag.contains("agent") || tag.contains("primary"))
        })
    }
}

/// Pre-aggregated numbers from `GET /api/stats/header`.
///
/// Server-side source of truth; the engine's weekly figures are a cross-check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderStats {
    #[serde(default, deserialize_with = "lenient_xp")]
    pub total_level: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub assets_tracked: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub followups_logged: u64,
    #[serde(default, deserialize_with = "lenient_xp")]
    pub streak_days: u64,
}

// ── Lenient field decoders ──

pub(crate) fn lenient_xp<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(v) => v,
            None => n.as_f64().map(sanitize_xp).unwrap_or(0),
        },
        Some(Value::String(s)) => s.trim().parse::<f64>().map(sanitize_xp).unwrap_or(0),
        _ => 0,
    })
}

fn lenient_skill<'de, D: Deserializer<'de>>(d: D) -> Result<Option<SkillType>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(SkillType::parse))
}

fn lenient_timestamp<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

fn lenient_flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        _ => false,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

fn lenient_related_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RecordId>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(RecordId(s)),
        Some(Value::Number(n)) => Some(RecordId(n.to_string())),
        _ => None,
    })
}

fn string_elements<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Parse the timestamp shapes the backend emits: RFC 3339 (with or without
/// fractional seconds), or a naive ISO datetime taken as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

//! "What does it take to level up?" hints.
//!
//! Turns XP remaining into a count of concrete broker actions using the
//! fixed XP each action awards.

use std::fmt;

use serde::Serialize;

use crate::model::SkillType;

pub const XP_PER_PROSPECT: u64 = 25;
pub const XP_PER_CALL: u64 = 15;
pub const XP_PER_EMAIL: u64 = 10;
pub const XP_PER_ACTIVE_DAY: u64 = 100;
pub const XP_PER_REQUIREMENT: u64 = 20;

/// Actions needed to cover a given XP gap, per skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "skill", rename_all = "camelCase")]
pub enum ActionEstimate {
    Prospecting {
        prospects: u64,
    },
    /// `mix_*` is one illustrative combination (calls first, emails for the
    /// remainder). Any `15·calls + 10·emails ≥ xp` would do.
    #[serde(rename_all = "camelCase")]
    FollowUp {
        calls_only: u64,
        emails_only: u64,
        mix_calls: u64,
        mix_emails: u64,
    },
    #[serde(rename_all = "camelCase")]
    Consistency {
        active_days: u64,
    },
    MarketKnowledge {
        requirements: u64,
    },
}

impl ActionEstimate {
    /// True when nothing further is needed.
    pub fn is_empty(&self) -> bool {
        match *self {
            ActionEstimate::Prospecting { prospects } => prospects == 0,
            ActionEstimate::FollowUp {
                calls_only,
                emails_only,
                ..
            } => calls_only == 0 && emails_only == 0,
            ActionEstimate::Consistency { active_days } => active_days == 0,
            ActionEstimate::MarketKnowledge { requirements } => requirements == 0,
        }
    }
}

pub fn estimate_actions(xp_to_next: u64, skill: SkillType) -> ActionEstimate {
    match skill {
        SkillType::Prospecting => ActionEstimate::Prospecting {
            prospects: xp_to_next.div_ceil(XP_PER_PROSPECT),
        },
        SkillType::FollowUp => {
            let mix_calls = xp_to_next / XP_PER_CALL;
            let remainder = xp_to_next - mix_calls * XP_PER_CALL;
            ActionEstimate::FollowUp {
                calls_only: xp_to_next.div_ceil(XP_PER_CALL),
                emails_only: xp_to_next.div_ceil(XP_PER_EMAIL),
                mix_calls,
                mix_emails: remainder.div_ceil(XP_PER_EMAIL),
            }
        }
        SkillType::Consistency => ActionEstimate::Consistency {
            active_days: xp_to_next.div_ceil(XP_PER_ACTIVE_DAY),
        },
        SkillType::MarketKnowledge => ActionEstimate::MarketKnowledge {
            requirements: xp_to_next.div_ceil(XP_PER_REQUIREMENT),
        },
    }
}

fn plural(n: u64, one: &str, many: &str) -> String {
    format!("{n} {}", if n == 1 { one } else { many })
}

impl fmt::Display for ActionEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Level up!");
        }
        match *self {
            ActionEstimate::Prospecting { prospects } => {
                write!(f, "≈ {} to add", plural(prospects, "prospect", "prospects"))
            }
            ActionEstimate::FollowUp {
                calls_only,
                emails_only,
                mix_calls,
                mix_emails,
            } => {
                let mix = match (mix_calls, mix_emails) {
                    (0, e) => plural(e, "email", "emails"),
                    (c, 0) => plural(c, "call", "calls"),
                    (c, e) => format!(
                        "{} + {}",
                        plural(c, "call", "calls"),
                        plural(e, "email", "emails")
                    ),
                };
                write!(
                    f,
                    "≈ {mix} (or {} / {})",
                    plural(calls_only, "call", "calls"),
                    plural(emails_only, "email", "emails")
                )
            }
            ActionEstimate::Consistency { active_days } => {
                write!(f, "≈ {}", plural(active_days, "active day", "active days"))
            }
            ActionEstimate::MarketKnowledge { requirements } => write!(
                f,
                "≈ {} to log",
                plural(requirements, "requirement", "requirements")
            ),
        }
    }
}

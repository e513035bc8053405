//! Terminal rendering for skill cards, goal rings and the leaderboard.
//!
//! Renderers return `String` so the layout is testable; `main` prints them.

use std::fmt::Write;

use brokerxp_core::{
    ActionEstimate, GoalRing, Progress, RankedEntry, SkillType, WeekKey, estimate_actions,
};

use crate::dashboard::Dashboard;

const BAR_WIDTH: usize = 20;
const MAX_NAME_WIDTH: usize = 24;

// ── Building blocks ──

/// `[#####...............]` for a 0..=100 percent.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let cut: String = s.chars().take(max - 3).collect();
        format!("{cut}...")
    } else {
        s.to_string()
    }
}

// ── Skill card ──

/// One skill's level, bar and next-level hint.
pub fn render_skill(
    out: &mut String,
    label: &str,
    xp: u64,
    progress: &Progress,
    hint: Option<&ActionEstimate>,
) {
    let _ = writeln!(
        out,
        "  {:<18} Lv {:>2}  {} {:>3}%  {:>7} xp",
        label,
        progress.level,
        progress_bar(progress.percent, BAR_WIDTH),
        progress.percent,
        xp
    );
    if progress.is_max_level() {
        let _ = writeln!(out, "  {:<18} max level", "");
        return;
    }
    let _ = write!(
        out,
        "  {:<18} {} xp to Lv {}",
        "",
        progress.xp_to_next,
        progress.level + 1
    );
    match hint {
        Some(est) => {
            let _ = writeln!(out, "  {est}");
        }
        None => out.push('\n'),
    }
}

/// Progress card for a bare XP value, as printed by `brokerxp level`.
pub fn render_level(xp: u64, progress: &Progress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Level {} ===", progress.level);
    let _ = writeln!(out, "  {:<18} {}", "xp", xp);
    let _ = writeln!(out, "  {:<18} {}", "xp into level", progress.xp_into_level);
    let _ = writeln!(out, "  {:<18} {}", "xp to next", progress.xp_to_next);
    let _ = writeln!(
        out,
        "  {:<18} {} {}%",
        "progress",
        progress_bar(progress.percent, BAR_WIDTH),
        progress.percent
    );
    out
}

pub fn render_estimate(skill: SkillType, xp_to_next: u64, estimate: &ActionEstimate) -> String {
    format!("{} ({} xp): {}\n", skill.label(), xp_to_next, estimate)
}

pub fn render_week(key: WeekKey, timezone: &str) -> String {
    format!(
        "week {}  ({} .. {}, {})\n",
        key,
        key.start().format("%a %d %b"),
        key.end().format("%a %d %b %Y"),
        timezone
    )
}

// ── Dashboard ──

fn render_ring(out: &mut String, ring: &GoalRing) {
    let _ = writeln!(
        out,
        "  {:<18} {} {:>3}%  {:>4}/{:<4}{}",
        ring.skill.label(),
        progress_bar(ring.percent, BAR_WIDTH),
        ring.percent,
        ring.earned,
        ring.goal,
        if ring.complete { "  done" } else { "" }
    );
}

pub fn render_dashboard(dash: &Dashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Skills (total level {}) ===", dash.skills.total_level());
    for skill in SkillType::ALL {
        let xp = dash.skills.xp(skill);
        let progress = brokerxp_core::progress(xp);
        let hint = estimate_actions(progress.xp_to_next, skill);
        render_skill(&mut out, skill.label(), xp, &progress, Some(&hint));
    }
    out.push('\n');

    let summary = &dash.summary;
    let _ = writeln!(out, "=== This week ({}, {}) ===", summary.week, dash.timezone);
    for ring in &dash.rings {
        render_ring(&mut out, ring);
    }
    let consistency = summary.xp(SkillType::Consistency);
    if consistency > 0 {
        let _ = writeln!(out, "  {:<18} {} xp", SkillType::Consistency.label(), consistency);
    }
    if summary.lead_agent_bonuses > 0 {
        let _ = writeln!(out, "  {:<18} {}", "lead-agent bonuses", summary.lead_agent_bonuses);
    }
    if summary.untimed_skipped > 0 {
        let _ = writeln!(
            out,
            "  {:<18} {} (no timestamp, not counted)",
            "skipped", summary.untimed_skipped
        );
    }
    out.push('\n');

    let header = &dash.header;
    let _ = writeln!(out, "=== Header ===");
    let _ = writeln!(out, "  {:<18} {:>8}  {:>8}", "", "server", "local");
    let _ = writeln!(
        out,
        "  {:<18} {:>8}  {:>8}",
        "total level",
        header.total_level,
        dash.skills.total_level()
    );
    let _ = writeln!(out, "  {:<18} {:>8}  {:>8}", "assets tracked", header.assets_tracked, "-");
    let _ = writeln!(
        out,
        "  {:<18} {:>8}  {:>8}",
        "follow-ups",
        header.followups_logged,
        format!("{} wk", summary.followup_count)
    );
    let _ = writeln!(
        out,
        "  {:<18} {:>8}  {:>8}",
        "streak days", header.streak_days, dash.streak_days
    );
    out
}

// ── Leaderboard ──

pub fn render_leaderboard(ranked: &[RankedEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Leaderboard ===");
    if ranked.is_empty() {
        let _ = writeln!(out, "  (no brokers)");
        return out;
    }
    let _ = writeln!(
        out,
        "  {:>4}  {:<width$}  {:>5}  {:>9}",
        "#",
        "broker",
        "level",
        "xp",
        width = MAX_NAME_WIDTH
    );
    for row in ranked {
        let name = if row.entry.display_name.is_empty() {
            row.entry.user_id.to_string()
        } else {
            row.entry.display_name.clone()
        };
        let _ = writeln!(
            out,
            "  {:>4}  {:<width$}  {:>5}  {:>9}",
            row.rank,
            truncate(&name, MAX_NAME_WIDTH),
            row.total_level,
            row.total_xp,
            width = MAX_NAME_WIDTH
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use brokerxp_core::{
        BrokerSkills, HeaderStats, LeaderboardEntry, RecordId, WeeklyGoals, WeeklySummary,
        progress, rank,
    };
    use chrono::NaiveDate;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 10), "[..........]");
        assert_eq!(progress_bar(50, 10), "[#####.....]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 10), "[##########]");
    }

    #[test]
    fn level_card_for_zero_xp() {
        let out = render_level(0, &progress(0));
        assert!(out.starts_with("=== Level 0 ==="));
        assert!(out.contains("xp to next"));
        assert!(out.contains("100"));
    }

    #[test]
    fn skill_line_shows_hint_or_max() {
        let mut out = String::new();
        let p = progress(55);
        let hint = estimate_actions(p.xp_to_next, SkillType::FollowUp);
        render_skill(&mut out, "Follow Up", 55, &p, Some(&hint));
        assert!(out.contains("45 xp to Lv 1"));
        assert!(out.contains("3 calls"));

        let mut out = String::new();
        let max = progress(u64::MAX);
        render_skill(&mut out, "Prospecting", u64::MAX, &max, None);
        assert!(out.contains("max level"));
    }

    #[test]
    fn leaderboard_table() {
        let ranked = rank(vec![
            LeaderboardEntry {
                user_id: RecordId::from("u-1"),
                display_name: String::new(),
                skills: BrokerSkills {
                    prospecting: 900,
                    ..BrokerSkills::default()
                },
            },
            LeaderboardEntry {
                user_id: RecordId::from("u-2"),
                display_name: "A very long broker display name indeed".into(),
                skills: BrokerSkills::default(),
            },
        ]);
        let out = render_leaderboard(&ranked);
        assert!(out.contains("u-1"));
        assert!(out.contains("A very long broker di..."));
        assert!(render_leaderboard(&[]).contains("no brokers"));
    }

    fn dashboard(sums: &[(SkillType, u64)], untimed: usize) -> Dashboard {
        let summary = WeeklySummary {
            week: WeekKey::containing(NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()),
            sums: sums.iter().copied().collect::<BTreeMap<_, _>>(),
            followup_count: 3,
            lead_agent_bonuses: 0,
            untimed_skipped: untimed,
            unknown_skill_skipped: 0,
        };
        Dashboard {
            skills: BrokerSkills {
                prospecting: 2500,
                follow_up: 400,
                ..BrokerSkills::default()
            },
            rings: WeeklyGoals::default().rings(&summary),
            summary,
            header: HeaderStats {
                total_level: 7,
                assets_tracked: 40,
                followups_logged: 7,
                streak_days: 5,
            },
            streak_days: 4,
            timezone: "America/New_York".into(),
        }
    }

    fn this_week_section(out: &str) -> &str {
        let start = out.find("=== This week").unwrap();
        let end = out.find("=== Header").unwrap();
        &out[start..end]
    }

    #[test]
    fn dashboard_shows_cards_rings_and_cross_checks() {
        let dash = dashboard(
            &[
                (SkillType::Prospecting, 125),
                (SkillType::FollowUp, 400),
                (SkillType::Consistency, 300),
            ],
            2,
        );
        let out = render_dashboard(&dash);

        assert!(out.starts_with("=== Skills (total level 7) ==="));
        assert!(out.contains("=== This week (2025-01-06, America/New_York) ==="));

        let week = this_week_section(&out);
        assert!(week.contains("125/250"));
        assert!(week.contains("400/400   done"));
        assert!(week.contains("  0/200"));
        assert!(week.contains(&format!("  {:<18} {} xp", "Consistency", 300)));
        assert!(week.contains("2 (no timestamp, not counted)"));

        assert!(out.contains(&format!(
            "  {:<18} {:>8}  {:>8}",
            "follow-ups", 7, "3 wk"
        )));
        assert!(out.contains(&format!(
            "  {:<18} {:>8}  {:>8}",
            "streak days", 5, 4
        )));
        assert!(out.contains(&format!(
            "  {:<18} {:>8}  {:>8}",
            "total level", 7, 7
        )));
    }

    #[test]
    fn dashboard_hides_idle_consistency_and_clean_skip_line() {
        let out = render_dashboard(&dashboard(&[(SkillType::Prospecting, 25)], 0));
        let week = this_week_section(&out);
        assert!(!week.contains("Consistency"));
        assert!(!week.contains("skipped"));
        // The skill card still lists every skill.
        assert!(out.contains("Consistency"));
    }
}

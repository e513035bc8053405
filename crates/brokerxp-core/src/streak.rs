//! Consecutive active days, as a client-side check on the header streak.

use std::collections::BTreeSet;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::model::SkillActivityEvent;
use crate::week::local_date;

/// Count consecutive local days with activity, ending today.
///
/// A day with no activity yet does not break the streak until it is over,
/// so a run ending yesterday still counts. Events without a timestamp and
/// events dated after today are ignored.
pub fn active_day_streak(events: &[SkillActivityEvent], now: DateTime<Utc>, tz: Tz) -> u32 {
    let today = local_date(now, tz);
    let active: BTreeSet<NaiveDate> = events
        .iter()
        .filter_map(|e| e.timestamp)
        .map(|ts| local_date(ts, tz))
        .filter(|d| *d <= today)
        .collect();

    let mut day = if active.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(d) => d,
            None => return 0,
        }
    };

    let mut streak = 0;
    while active.contains(&day) {
        streak += 1;
        match day.checked_sub_days(Days::new(1)) {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RecordId, SkillType};
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn ev(ts: Option<DateTime<Utc>>) -> SkillActivityEvent {
        SkillActivityEvent {
            id: RecordId::from("e"),
            skill_type: Some(SkillType::Consistency),
            action: "daily_login".into(),
            xp_gained: 100,
            timestamp: ts,
            related_id: None,
        }
    }

    #[test]
    fn counts_run_ending_today() {
        let events = vec![
            ev(Some(at(2025, 1, 8, 9))),
            ev(Some(at(2025, 1, 9, 9))),
            ev(Some(at(2025, 1, 9, 15))),
            ev(Some(at(2025, 1, 10, 8))),
        ];
        assert_eq!(active_day_streak(&events, at(2025, 1, 10, 18), New_York), 3);
    }

    #[test]
    fn run_ending_yesterday_still_counts() {
        let events = vec![ev(Some(at(2025, 1, 8, 9))), ev(Some(at(2025, 1, 9, 9)))];
        assert_eq!(active_day_streak(&events, at(2025, 1, 10, 7), New_York), 2);
    }

    #[test]
    fn gap_breaks_streak() {
        let events = vec![ev(Some(at(2025, 1, 6, 9))), ev(Some(at(2025, 1, 8, 9)))];
        assert_eq!(active_day_streak(&events, at(2025, 1, 8, 10), New_York), 1);
        assert_eq!(active_day_streak(&events, at(2025, 1, 10, 10), New_York), 0);
    }

    #[test]
    fn untimed_and_future_events_ignored() {
        let events = vec![ev(None), ev(Some(at(2025, 1, 11, 9)))];
        assert_eq!(active_day_streak(&events, at(2025, 1, 10, 10), New_York), 0);
        assert_eq!(active_day_streak(&[], at(2025, 1, 10, 10), New_York), 0);
    }

    #[test]
    fn uses_local_calendar_day() {
        // 23:30 New York on the 9th is already the 10th in UTC.
        let late = New_York
            .with_ymd_and_hms(2025, 1, 9, 23, 30, 0)
            .unwrap()
            .with_timezone(&Utc);
        let events = vec![ev(Some(at(2025, 1, 8, 9))), ev(Some(late))];
        assert_eq!(active_day_streak(&events, at(2025, 1, 9, 23), New_York), 2);
    }
}

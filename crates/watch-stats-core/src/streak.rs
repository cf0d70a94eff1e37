// Streak detector: weekly watching streaks, monthly pace and recency.
// Only watched dates matter here; ratings and genres are ignored.

use crate::numeric::round_half_up;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeSet;
use tracing::debug;
use watch_stats_models::{StreakStats, WatchedEntry};

/// Monday of the ISO week containing `date`; used as the week identifier.
/// Saturates at the earliest representable date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = Duration::days(i64::from(date.weekday().num_days_from_monday()));
    date.checked_sub_signed(offset).unwrap_or(NaiveDate::MIN)
}

fn is_next_week(earlier: NaiveDate, later: NaiveDate) -> bool {
    later - earlier == Duration::weeks(1)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Sorted, distinct active weeks
pub fn active_weeks(entries: &[WatchedEntry]) -> Vec<NaiveDate> {
    let weeks: BTreeSet<NaiveDate> = entries
        .iter()
        .filter_map(|e| e.watched_date)
        .map(week_start)
        .collect();
    weeks.into_iter().collect()
}

/// Longest run of consecutive weeks
pub fn longest_streak(weeks: &[NaiveDate]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &week in weeks {
        run = match previous {
            Some(prev) if is_next_week(prev, week) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(week);
    }
    longest
}

/// Run ending at the latest active week, provided that week is the current
/// week or the one before it. A streak stays live until a full week passes
/// without a watch.
pub fn current_streak(weeks: &[NaiveDate], today: NaiveDate) -> u32 {
    let Some(&latest) = weeks.last() else {
        return 0;
    };

    let previous_week = week_start(today)
        .checked_sub_signed(Duration::weeks(1))
        .unwrap_or(NaiveDate::MIN);
    if latest < previous_week {
        return 0;
    }

    let mut run = 1;
    for pair in weeks.windows(2).rev() {
        if is_next_week(pair[0], pair[1]) {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// Dated entries divided by months spanned (earliest to latest, inclusive)
pub fn avg_per_month(dates: &[NaiveDate]) -> f64 {
    let (Some(earliest), Some(latest)) = (dates.iter().min(), dates.iter().max()) else {
        return 0.0;
    };
    let months = month_index(*latest) - month_index(*earliest) + 1;
    round_half_up(dates.len() as f64 / months as f64, 1)
}

pub fn streak_stats(entries: &[WatchedEntry], today: NaiveDate) -> StreakStats {
    let dates: Vec<NaiveDate> = entries.iter().filter_map(|e| e.watched_date).collect();
    if dates.is_empty() {
        return StreakStats::default();
    }

    let weeks = active_weeks(entries);
    let last_watch = dates.iter().max().copied().unwrap_or(today);

    let stats = StreakStats {
        current_streak: current_streak(&weeks, today),
        longest_streak: longest_streak(&weeks),
        avg_movies_per_month: avg_per_month(&dates),
        // Future-dated entries clamp to zero
        days_since_last_watch: (today - last_watch).num_days().max(0),
    };

    debug!(
        "streak_stats: {} active weeks, current={}, longest={}",
        weeks.len(),
        stats.current_streak,
        stats.longest_streak
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn on(id: &str, d: NaiveDate) -> WatchedEntry {
        WatchedEntry::new(id, format!("Movie {}", id), 3.0).with_date(d)
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2024-01-03 is a Wednesday
        assert_eq!(week_start(date(2024, 1, 3)), date(2024, 1, 1));
        assert_eq!(week_start(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(week_start(date(2024, 1, 7)), date(2024, 1, 1));
        // Week spanning the year boundary
        assert_eq!(week_start(date(2021, 1, 1)), date(2020, 12, 28));
    }

    #[test]
    fn test_week_start_saturates_at_min_date() {
        assert_eq!(week_start(NaiveDate::MIN), NaiveDate::MIN);
        let weeks = vec![week_start(NaiveDate::MIN)];
        assert_eq!(current_streak(&weeks, NaiveDate::MIN), 1);
    }

    #[test]
    fn test_three_consecutive_weeks() {
        // Mondays: 2024-03-04, 03-11, 03-18
        let entries = vec![
            on("1", date(2024, 3, 5)),
            on("2", date(2024, 3, 14)),
            on("3", date(2024, 3, 14)),
            on("4", date(2024, 3, 24)),
        ];
        let stats = streak_stats(&entries, date(2024, 3, 20));
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.current_streak, 3);

        // Following week, nothing watched yet: still live
        let stats = streak_stats(&entries, date(2024, 3, 27));
        assert_eq!(stats.current_streak, 3);

        // Two weeks later: broken
        let stats = streak_stats(&entries, date(2024, 4, 3));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 3);
    }

    #[test]
    fn test_gap_breaks_streak() {
        let entries = vec![on("1", date(2024, 3, 5)), on("2", date(2024, 3, 19))];
        let stats = streak_stats(&entries, date(2024, 3, 20));
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn test_current_streak_uses_latest_run_only() {
        let weeks = vec![
            date(2024, 1, 1),
            date(2024, 1, 8),
            date(2024, 1, 15),
            date(2024, 1, 29),
            date(2024, 2, 5),
        ];
        assert_eq!(longest_streak(&weeks), 3);
        assert_eq!(current_streak(&weeks, date(2024, 2, 7)), 2);
    }

    #[test]
    fn test_streak_across_year_boundary() {
        let entries = vec![
            on("1", date(2020, 12, 22)),
            on("2", date(2021, 1, 1)),
            on("3", date(2021, 1, 6)),
        ];
        let stats = streak_stats(&entries, date(2021, 1, 6));
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.current_streak, 3);
    }

    #[test]
    fn test_single_recent_entry() {
        let entries = vec![on("1", date(2024, 5, 10))];
        let stats = streak_stats(&entries, date(2024, 5, 12));
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.avg_movies_per_month, 1.0);
        assert_eq!(stats.days_since_last_watch, 2);
    }

    #[test]
    fn test_avg_per_month_spans_inclusive_months() {
        let dates = vec![date(2023, 11, 30), date(2024, 1, 1), date(2024, 1, 2)];
        // Nov, Dec, Jan -> 3 months
        assert_eq!(avg_per_month(&dates), 1.0);
        let dates = vec![date(2024, 1, 1), date(2024, 2, 1), date(2024, 2, 2), date(2024, 2, 3)];
        assert_eq!(avg_per_month(&dates), 2.0);
        let dates = vec![date(2024, 1, 1), date(2024, 3, 1)];
        assert_eq!(avg_per_month(&dates), 0.7);
        assert_eq!(avg_per_month(&[]), 0.0);
    }

    #[test]
    fn test_empty_and_undated_entries() {
        let today = date(2024, 5, 1);
        assert_eq!(streak_stats(&[], today), StreakStats::default());
        let undated = vec![WatchedEntry::new("1", "Undated", 4.0)];
        assert_eq!(streak_stats(&undated, today), StreakStats::default());
    }

    #[test]
    fn test_future_dates_clamp_recency() {
        let entries = vec![on("1", date(2024, 6, 1))];
        let stats = streak_stats(&entries, date(2024, 5, 1));
        assert_eq!(stats.days_since_last_watch, 0);
        assert_eq!(stats.current_streak, 1);
    }
}

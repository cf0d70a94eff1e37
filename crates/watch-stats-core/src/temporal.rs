// Temporal aggregator: monthly timeline and the annual daily heatmap.
// Undated entries never reach these buckets.

use crate::numeric::RatingAccumulator;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;
use watch_stats_models::{DayStats, Heatmap, MonthlyBucket, WatchedEntry};

/// Group dated entries by (year, month), most recent month first
pub fn monthly_timeline(entries: &[WatchedEntry]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<(i32, u32), RatingAccumulator> = BTreeMap::new();

    for entry in entries {
        if let Some(key) = entry.watched_month() {
            months.entry(key).or_default().push(entry.my_rating);
        }
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), acc)| MonthlyBucket {
            year,
            month,
            count: acc.count(),
            avg_rating: acc.rounded_mean(1),
        })
        .collect()
}

/// Every calendar day of `year`, Jan 1 through Dec 31.
///
/// Walks the calendar instead of assuming 365 days, so Feb 29 shows up in
/// leap years. Years chrono cannot represent yield nothing.
pub fn days_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    std::iter::successors(start, |day| day.succ_opt())
        .take_while(move |day| day.year() == year)
}

/// Daily counts and average ratings for one year.
///
/// Days without activity are omitted; `max_count` is the busiest day's
/// count for intensity scaling. A year without data is an empty map.
pub fn annual_heatmap(entries: &[WatchedEntry], year: i32) -> Heatmap {
    let mut by_day: HashMap<NaiveDate, RatingAccumulator> = HashMap::new();
    for entry in entries {
        if let Some(date) = entry.watched_date.filter(|d| d.year() == year) {
            by_day.entry(date).or_default().push(entry.my_rating);
        }
    }

    if by_day.is_empty() {
        debug!("annual_heatmap: no activity in {}", year);
        return Heatmap::empty(year);
    }

    let mut heatmap = Heatmap::empty(year);
    for day in days_of_year(year) {
        let Some(acc) = by_day.get(&day) else {
            continue;
        };
        heatmap.max_count = heatmap.max_count.max(acc.count());
        heatmap.total_count += acc.count();
        heatmap.days.insert(
            day.format("%Y-%m-%d").to_string(),
            DayStats {
                count: acc.count(),
                avg_rating: acc.rounded_mean(1),
            },
        );
    }

    debug!(
        "annual_heatmap: {} active days in {}, max {} per day",
        heatmap.days.len(),
        year,
        heatmap.max_count
    );
    heatmap
}

/// Years with at least one dated entry, most recent first
pub fn active_years(entries: &[WatchedEntry]) -> Vec<i32> {
    let years: BTreeSet<i32> = entries
        .iter()
        .filter_map(|e| e.watched_date.map(|d| d.year()))
        .collect();
    years.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(id: &str, rating: f64, y: i32, m: u32, d: u32) -> WatchedEntry {
        WatchedEntry::new(id, format!("Movie {}", id), rating)
            .with_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_timeline_single_month() {
        let entries = vec![
            dated("1", 4.5, 2020, 3, 10).with_genres(["Drama"]),
            dated("2", 4.5, 2020, 3, 17).with_genres(["Drama"]),
        ];
        let timeline = monthly_timeline(&entries);
        assert_eq!(
            timeline,
            vec![MonthlyBucket {
                year: 2020,
                month: 3,
                count: 2,
                avg_rating: 4.5
            }]
        );
    }

    #[test]
    fn test_timeline_most_recent_first_and_skips_undated() {
        let entries = vec![
            dated("1", 3.0, 2019, 12, 31),
            dated("2", 4.0, 2021, 1, 5),
            dated("3", 2.0, 2020, 6, 1),
            dated("4", 5.0, 2021, 1, 20),
            WatchedEntry::new("5", "Undated", 1.0),
        ];
        let timeline = monthly_timeline(&entries);
        let keys: Vec<(i32, u32)> = timeline.iter().map(|b| (b.year, b.month)).collect();
        assert_eq!(keys, vec![(2021, 1), (2020, 6), (2019, 12)]);
        assert_eq!(timeline[0].count, 2);
        assert_eq!(timeline[0].avg_rating, 4.5);
        assert_eq!(timeline.iter().map(|b| b.count).sum::<u32>(), 4);
    }

    #[test]
    fn test_days_of_year_handles_leap_years() {
        assert_eq!(days_of_year(2023).count(), 365);
        assert_eq!(days_of_year(2024).count(), 366);
        assert_eq!(days_of_year(1900).count(), 365);
        assert_eq!(days_of_year(2000).count(), 366);
        assert!(days_of_year(2024).any(|d| d.month() == 2 && d.day() == 29));
    }

    #[test]
    fn test_heatmap_counts_and_max() {
        let entries = vec![
            dated("1", 4.0, 2024, 2, 29),
            dated("2", 3.0, 2024, 2, 29),
            dated("3", 5.0, 2024, 12, 31),
            dated("4", 5.0, 2023, 12, 31),
            WatchedEntry::new("5", "Undated", 2.0),
        ];
        let heatmap = annual_heatmap(&entries, 2024);
        assert_eq!(heatmap.year, 2024);
        assert_eq!(heatmap.days.len(), 2);
        assert_eq!(heatmap.max_count, 2);
        assert_eq!(heatmap.total_count, 3);
        assert_eq!(heatmap.count_on("2024-02-29"), 2);
        assert_eq!(heatmap.days["2024-02-29"].avg_rating, 3.5);
        assert_eq!(heatmap.count_on("2024-01-01"), 0);
    }

    #[test]
    fn test_heatmap_sum_matches_entries_in_year() {
        let entries: Vec<WatchedEntry> = (0..120u32)
            .map(|i| dated(&i.to_string(), 3.0, 2019 + (i % 3) as i32, 1 + i % 12, 1 + i % 28))
            .collect();
        for year in 2019..=2021 {
            let heatmap = annual_heatmap(&entries, year);
            let expected = entries
                .iter()
                .filter(|e| e.watched_date.map(|d| d.year()) == Some(year))
                .count() as u32;
            let sum: u32 = heatmap.days.values().map(|d| d.count).sum();
            assert_eq!(sum, expected);
            assert_eq!(heatmap.total_count, expected);
        }
    }

    #[test]
    fn test_heatmap_empty_and_far_future_years() {
        let entries = vec![dated("1", 4.0, 2020, 5, 5)];
        assert_eq!(annual_heatmap(&entries, 1999), Heatmap::empty(1999));
        assert_eq!(annual_heatmap(&entries, 9999), Heatmap::empty(9999));
        assert_eq!(annual_heatmap(&[], 2020).max_count, 0);
    }

    #[test]
    fn test_active_years() {
        let entries = vec![
            dated("1", 4.0, 2018, 5, 5),
            dated("2", 4.0, 2021, 5, 5),
            dated("3", 4.0, 2018, 6, 5),
            WatchedEntry::new("4", "Undated", 2.0),
        ];
        assert_eq!(active_years(&entries), vec![2021, 2018]);
        assert!(active_years(&[]).is_empty());
    }
}

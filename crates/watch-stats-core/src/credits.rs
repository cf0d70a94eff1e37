// Credit ranker: directors and actors by appearances and mean rating.

use crate::numeric::RatingAccumulator;
use std::collections::{HashMap, HashSet};
use watch_stats_models::{PersonStat, WatchedEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditRole {
    Director,
    Actor,
}

impl CreditRole {
    fn people<'a>(&self, entry: &'a WatchedEntry) -> &'a [String] {
        match self {
            CreditRole::Director => &entry.directors,
            CreditRole::Actor => &entry.actors,
        }
    }
}

/// Full ranking for one role.
///
/// A person counts once per entry even if listed twice in it. Ordered by
/// count descending, then average rating descending, then name ascending.
pub fn full_ranking(entries: &[WatchedEntry], role: CreditRole) -> Vec<PersonStat> {
    let mut tally: HashMap<&str, RatingAccumulator> = HashMap::new();

    for entry in entries {
        let mut seen: HashSet<&str> = HashSet::new();
        for name in role.people(entry) {
            if seen.insert(name.as_str()) {
                tally.entry(name.as_str()).or_default().push(entry.my_rating);
            }
        }
    }

    let mut ranking: Vec<PersonStat> = tally
        .into_iter()
        .map(|(name, acc)| PersonStat {
            name: name.to_string(),
            count: acc.count(),
            avg_rating: acc.rounded_mean(2),
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.avg_rating.total_cmp(&a.avg_rating))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranking
}

/// Top `limit` people for one role; always a prefix of the full ranking
pub fn rank_people(entries: &[WatchedEntry], role: CreditRole, limit: usize) -> Vec<PersonStat> {
    let mut ranking = full_ranking(entries, role);
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, rating: f64) -> WatchedEntry {
        WatchedEntry::new(id, format!("Movie {}", id), rating)
    }

    #[test]
    fn test_average_of_two_entries() {
        let entries = vec![
            entry("1", 5.0).with_directors(["Denis Villeneuve"]),
            entry("2", 3.0).with_directors(["Denis Villeneuve"]),
        ];
        let ranking = rank_people(&entries, CreditRole::Director, 5);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].count, 2);
        assert_eq!(ranking[0].avg_rating, 4.0);
    }

    #[test]
    fn test_duplicate_names_in_one_entry_count_once() {
        let entries = vec![entry("1", 4.0).with_actors(["Tom Hanks", "Tom Hanks", "Meg Ryan"])];
        let ranking = full_ranking(&entries, CreditRole::Actor);
        let hanks = ranking.iter().find(|p| p.name == "Tom Hanks").unwrap();
        assert_eq!(hanks.count, 1);
    }

    #[test]
    fn test_ordering_and_tie_breaks() {
        let entries = vec![
            entry("1", 5.0).with_actors(["Alice", "Bob", "Carol"]),
            entry("2", 3.0).with_actors(["Alice", "Bob"]),
            entry("3", 2.0).with_actors(["Bob", "Dave"]),
            entry("4", 5.0).with_actors(["Carol", "Erin"]),
            entry("5", 5.0).with_actors(["Dave"]),
        ];
        let ranking = full_ranking(&entries, CreditRole::Actor);
        let names: Vec<&str> = ranking.iter().map(|p| p.name.as_str()).collect();
        // Bob: 3; Carol: 2 @5.0; Alice: 2 @4.0; Dave: 2 @3.5; Erin: 1
        assert_eq!(names, vec!["Bob", "Carol", "Alice", "Dave", "Erin"]);
        assert_eq!(ranking[0].avg_rating, 3.33);
    }

    #[test]
    fn test_name_breaks_full_ties() {
        let entries = vec![entry("1", 4.0).with_directors(["Zoe", "Adam", "Mia"])];
        let names: Vec<String> = full_ranking(&entries, CreditRole::Director)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Adam", "Mia", "Zoe"]);
    }

    #[test]
    fn test_truncation_is_prefix_of_full_ranking() {
        let entries: Vec<WatchedEntry> = (0..30)
            .map(|i| {
                entry(&i.to_string(), (i % 10) as f64 * 0.5 + 0.5)
                    .with_actors([format!("Actor {}", i % 7), format!("Actor {}", i % 4)])
            })
            .collect();
        let full = full_ranking(&entries, CreditRole::Actor);
        for limit in 0..=full.len() + 2 {
            let top = rank_people(&entries, CreditRole::Actor, limit);
            assert_eq!(top.as_slice(), &full[..limit.min(full.len())]);
        }
    }

    #[test]
    fn test_roles_are_independent() {
        let entries = vec![entry("1", 4.0)
            .with_directors(["Clint Eastwood"])
            .with_actors(["Clint Eastwood", "Morgan Freeman"])];
        assert_eq!(full_ranking(&entries, CreditRole::Director).len(), 1);
        assert_eq!(full_ranking(&entries, CreditRole::Actor).len(), 2);
        assert!(full_ranking(&[], CreditRole::Actor).is_empty());
    }
}

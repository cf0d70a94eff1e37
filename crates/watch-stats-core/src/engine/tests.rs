use super::*;
use serde_json::Value;
use watch_stats_models::{RawEpisodeRecord, SkipReason, Trend};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn raw_movie(id: &str, rating: f64, watched: &str) -> RawMovieRecord {
    RawMovieRecord {
        id: Some(Value::from(id)),
        title: Some(format!("Movie {}", id)),
        my_rating: Some(rating),
        watched_date: Some(watched.to_string()),
        ..Default::default()
    }
}

fn sample_history() -> Vec<RawMovieRecord> {
    vec![
        RawMovieRecord {
            genres: vec!["Drama".into()],
            release_year: Some(1994),
            runtime_minutes: Some(142),
            directors: vec!["Frank Darabont".into()],
            actors: vec!["Tim Robbins".into(), "Morgan Freeman".into()],
            ..raw_movie("m1", 4.5, "2020-03-10")
        },
        RawMovieRecord {
            genres: vec!["Drama".into()],
            release_year: Some(1999),
            runtime_minutes: Some(189),
            directors: vec!["Frank Darabont".into()],
            actors: vec!["Tom Hanks".into()],
            ..raw_movie("m2", 4.5, "2020-03-17")
        },
        RawMovieRecord {
            genres: vec!["Crime".into(), "Drama".into()],
            release_year: Some(1995),
            directors: vec!["Michael Mann".into()],
            actors: vec!["Al Pacino".into(), "Robert De Niro".into()],
            ..raw_movie("m3", 3.0, "2021-07-04")
        },
        raw_movie("bad", 7.0, "2021-07-05"),
    ]
}

#[test]
fn test_drama_scenario() {
    let engine = StatsEngine::default();
    let entries = vec![
        WatchedEntry::new("1", "A", 4.5)
            .with_genres(["Drama"])
            .with_date(date(2020, 3, 10)),
        WatchedEntry::new("2", "B", 4.5)
            .with_genres(["Drama"])
            .with_date(date(2020, 3, 17)),
    ];

    let overview = engine.overview(&entries);
    assert_eq!(overview.genres.len(), 1);
    assert_eq!(overview.genres[0].genre, "Drama");
    assert_eq!(overview.genres[0].count, 2);
    assert_eq!(overview.genres[0].avg_rating, 4.5);

    assert_eq!(overview.timeline.len(), 1);
    assert_eq!((overview.timeline[0].year, overview.timeline[0].month), (2020, 3));
    assert_eq!(overview.timeline[0].count, 2);
    assert_eq!(overview.timeline[0].avg_rating, 4.5);
}

#[test]
fn test_empty_inputs_return_zero_structures() {
    let engine = StatsEngine::default();

    let overview = engine.overview(&[]);
    assert_eq!(overview.rating_distribution.len(), 10);
    assert_eq!(overview.rating_distribution.total(), 0);
    assert!(overview.genres.is_empty());
    assert!(overview.decades.is_empty());
    assert!(overview.timeline.is_empty());
    assert!(overview.active_years.is_empty());

    let heatmap = engine.heatmap(&[], 2024).unwrap();
    assert!(heatmap.days.is_empty());
    assert_eq!(heatmap.max_count, 0);

    assert_eq!(engine.streaks_as_of(&[], date(2024, 1, 1)), StreakStats::default());

    let people = engine.top_people(&[], None).unwrap();
    assert!(people.directors.is_empty());
    assert!(people.actors.is_empty());

    let show = engine.show(1, &[]);
    assert_eq!(show.total_episodes, 0);
    assert_eq!(show.trend, Trend::Stable);

    let json = serde_json::to_value(&overview).unwrap();
    assert!(json["ratingDistribution"].is_object());
    assert!(json["genres"].is_array());
}

#[test]
fn test_year_validation() {
    let engine = StatsEngine::default();
    assert!(engine.heatmap(&[], 1).is_ok());
    assert!(engine.heatmap(&[], 9999).is_ok());
    assert!(matches!(
        engine.heatmap(&[], 0),
        Err(AnalyticsError::InvalidYear { year: 0, .. })
    ));
    assert!(matches!(
        engine.heatmap(&[], -2020),
        Err(AnalyticsError::InvalidYear { .. })
    ));
    assert!(matches!(
        engine.heatmap(&[], 10_000),
        Err(AnalyticsError::InvalidYear { .. })
    ));
}

#[test]
fn test_limit_validation() {
    let engine = StatsEngine::default();
    assert_eq!(engine.validate_limit(None).unwrap(), 5);
    assert_eq!(engine.validate_limit(Some(1)).unwrap(), 1);
    assert_eq!(engine.validate_limit(Some(100)).unwrap(), 100);
    assert!(matches!(
        engine.validate_limit(Some(-3)),
        Err(AnalyticsError::InvalidLimit { limit: -3, max: 100 })
    ));
    assert!(engine.validate_limit(Some(0)).is_err());
    assert!(engine.validate_limit(Some(101)).is_err());

    let err = engine.top_people(&[], Some(-1)).unwrap_err();
    assert!(err.to_string().contains("invalid limit -1"));
}

#[test]
fn test_invalid_threshold_rejected() {
    let config = AnalyticsConfig {
        trend_threshold: -1.0,
        ..AnalyticsConfig::default()
    };
    assert!(matches!(
        StatsEngine::new(config),
        Err(AnalyticsError::InvalidThreshold(_))
    ));
}

#[test]
fn test_show_uses_configured_threshold() {
    let episodes = vec![
        RatedEpisode::new(7, 1, 1, 7.0),
        RatedEpisode::new(7, 2, 1, 7.2),
    ];
    assert_eq!(StatsEngine::default().show(7, &episodes).trend, Trend::Stable);

    let strict = StatsEngine::new(AnalyticsConfig {
        trend_threshold: 0.1,
        ..AnalyticsConfig::default()
    })
    .unwrap();
    assert_eq!(strict.show(7, &episodes).trend, Trend::Improving);
}

#[test]
fn test_dashboard_composes_all_aggregates() {
    let engine = StatsEngine::default();
    let request = DashboardRequest::new(date(2021, 7, 8)).with_limit(2);
    let dashboard = engine.dashboard(&sample_history(), &request).unwrap();

    assert_eq!(dashboard.skipped.skipped, 1);
    assert_eq!(dashboard.skipped.count(SkipReason::RatingOutOfRange), 1);
    assert_eq!(dashboard.overview.summary.total_entries, 3);
    assert_eq!(dashboard.overview.active_years, vec![2021, 2020]);

    // Defaults to the latest active year
    assert_eq!(dashboard.heatmap.year, 2021);
    assert_eq!(dashboard.heatmap.count_on("2021-07-04"), 1);

    assert_eq!(dashboard.streaks.current_streak, 1);
    assert_eq!(dashboard.streaks.days_since_last_watch, 4);

    assert_eq!(dashboard.people.directors.len(), 2);
    assert_eq!(dashboard.people.directors[0].name, "Frank Darabont");
    assert_eq!(dashboard.people.directors[0].avg_rating, 4.5);
    assert_eq!(dashboard.people.actors.len(), 2);

    let decades: Vec<&str> = dashboard
        .overview
        .decades
        .iter()
        .map(|d| d.decade.as_str())
        .collect();
    assert_eq!(decades, vec!["1990s"]);
    assert_eq!(dashboard.overview.decades[0].total_runtime, 331);
}

#[test]
fn test_dashboard_rejects_bad_parameters() {
    let engine = StatsEngine::default();
    let request = DashboardRequest::new(date(2021, 7, 8)).with_year(0);
    assert!(engine.dashboard(&sample_history(), &request).is_err());

    let request = DashboardRequest::new(date(2021, 7, 8)).with_limit(-5);
    assert!(engine.dashboard(&sample_history(), &request).is_err());
}

#[test]
fn test_dashboard_without_history_uses_today_year() {
    let engine = StatsEngine::default();
    let dashboard = engine
        .dashboard(&[], &DashboardRequest::new(date(2023, 2, 1)))
        .unwrap();
    assert_eq!(dashboard.heatmap, Heatmap::empty(2023));
    assert!(dashboard.skipped.is_empty());
}

#[test]
fn test_dashboard_default_year_never_fails_on_data() {
    let engine = StatsEngine::default();
    let request = DashboardRequest::new(date(2024, 1, 1));
    let dashboard = engine
        .dashboard(&[raw_movie("m1", 4.0, "0000-06-15")], &request)
        .unwrap();
    assert_eq!(dashboard.skipped.count(SkipReason::InvalidDate), 1);
    assert_eq!(dashboard.heatmap.year, 2024);

    // Activity outside the configured bounds falls back to today's year
    let narrow = StatsEngine::new(AnalyticsConfig {
        heatmap_min_year: 2000,
        heatmap_max_year: 2030,
        ..AnalyticsConfig::default()
    })
    .unwrap();
    let history = vec![
        raw_movie("m1", 4.0, "1995-05-01"),
        raw_movie("m2", 3.0, "2040-05-01"),
    ];
    let dashboard = narrow.dashboard(&history, &request).unwrap();
    assert_eq!(dashboard.heatmap.year, 2024);
    assert_eq!(dashboard.overview.active_years, vec![2040, 1995]);

    let history = vec![
        raw_movie("m1", 4.0, "2040-05-01"),
        raw_movie("m2", 3.0, "2012-05-01"),
    ];
    assert_eq!(narrow.dashboard(&history, &request).unwrap().heatmap.year, 2012);
}

#[tokio::test]
async fn test_concurrent_dashboard_matches_sequential() {
    let engine = StatsEngine::default();
    let request = DashboardRequest::new(date(2021, 7, 8)).with_year(2020);
    let history = sample_history();

    let sequential = engine.dashboard(&history, &request).unwrap();
    let concurrent = engine.dashboard_concurrent(&history, &request).await.unwrap();
    assert_eq!(sequential, concurrent);
    assert_eq!(concurrent.heatmap.year, 2020);
    assert_eq!(concurrent.heatmap.total_count, 2);
}

#[test]
fn test_normalize_mixed_batch() {
    let engine = StatsEngine::default();
    let raw = vec![
        RawRecord::Movie(raw_movie("m1", 4.0, "2022-01-01")),
        RawRecord::Episode(RawEpisodeRecord {
            show_id: Some(3),
            season_number: Some(1),
            episode_number: Some(1),
            name: Some("Pilot".into()),
            vote_average: Some(8.5),
            invalid_fields: Vec::new(),
        }),
    ];
    let batch = engine.normalize(&raw);
    assert_eq!(batch.entries.len(), 1);
    assert_eq!(batch.episodes.len(), 1);
    assert_eq!(engine.show(3, &batch.episodes).total_episodes, 1);
}

// Human-readable rendering of engine responses. JSON output bypasses this
// module entirely.

use crate::output::Output;
use chrono::Datelike;
use comfy_table::{Cell, CellAlignment, Table};
use owo_colors::OwoColorize;
use watch_stats_core::days_of_year;
use watch_stats_models::{Heatmap, Overview, PeopleRanking, PersonStat, ShowAnalytics, StreakStats, Trend};

const BAR_WIDTH: usize = 30;
const INTENSITY: [char; 5] = ['·', '░', '▒', '▓', '█'];

fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).add_attribute(comfy_table::Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn section(title: &str) {
    println!("\n{}", title.bright_cyan().bold());
}

fn number(value: impl std::fmt::Display) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

fn bar(count: u32, max: u32) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = ((count as usize * BAR_WIDTH) + max as usize - 1) / max as usize;
    "█".repeat(width)
}

pub fn overview(overview: &Overview, output: &Output) {
    if output.is_quiet() {
        return;
    }

    section("Overview");
    let summary = &overview.summary;
    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("Entries"), number(summary.total_entries)]);
    table.add_row(vec![Cell::new("Dated Entries"), number(summary.dated_entries)]);
    table.add_row(vec![Cell::new("Average Rating"), number(format!("{:.2}", summary.average_rating))]);
    table.add_row(vec![Cell::new("Hours Watched"), number(format!("{:.1}", summary.total_hours))]);
    table.add_row(vec![Cell::new("Genres"), number(summary.distinct_genres)]);
    println!("{}", table);

    section("Ratings");
    let max = overview
        .rating_distribution
        .iter()
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(0);
    for (rating, count) in overview.rating_distribution.iter().rev() {
        println!("{:>4} ★ │ {:<width$} {}", rating, bar(*count, max).yellow(), count, width = BAR_WIDTH);
    }

    if !overview.genres.is_empty() {
        section("Genres");
        let mut table = new_table(&["Genre", "Count", "Avg Rating"]);
        for genre in &overview.genres {
            table.add_row(vec![
                Cell::new(&genre.genre),
                number(genre.count),
                number(format!("{:.1}", genre.avg_rating)),
            ]);
        }
        println!("{}", table);
    }

    if !overview.decades.is_empty() {
        section("Decades");
        let mut table = new_table(&["Decade", "Count", "Avg Rating", "Runtime (min)"]);
        for decade in &overview.decades {
            table.add_row(vec![
                Cell::new(&decade.decade),
                number(decade.count),
                number(format!("{:.1}", decade.avg_rating)),
                number(decade.total_runtime),
            ]);
        }
        println!("{}", table);
    }

    if !overview.timeline.is_empty() {
        section("Timeline");
        let mut table = new_table(&["Month", "Count", "Avg Rating"]);
        for bucket in &overview.timeline {
            table.add_row(vec![
                Cell::new(format!("{}-{:02}", bucket.year, bucket.month)),
                number(bucket.count),
                number(format!("{:.1}", bucket.avg_rating)),
            ]);
        }
        println!("{}", table);
    }
}

fn intensity(count: u32, max: u32) -> char {
    if count == 0 || max == 0 {
        return INTENSITY[0];
    }
    let levels = (INTENSITY.len() - 1) as u32;
    let level = (count * levels + max - 1) / max;
    INTENSITY[level.min(levels) as usize]
}

pub fn heatmap(heatmap: &Heatmap, output: &Output) {
    if output.is_quiet() {
        return;
    }

    section(&format!("Activity {}", heatmap.year));
    if heatmap.days.is_empty() {
        println!("No activity recorded in {}", heatmap.year);
        return;
    }

    let mut current_month = 0;
    let mut line = String::new();
    for day in days_of_year(heatmap.year) {
        if day.month() != current_month {
            if !line.is_empty() {
                println!("{}", line);
            }
            current_month = day.month();
            line = format!("{} │ ", day.format("%b"));
        }
        let key = day.format("%Y-%m-%d").to_string();
        line.push(intensity(heatmap.count_on(&key), heatmap.max_count));
    }
    if !line.is_empty() {
        println!("{}", line);
    }

    println!(
        "\n{} watches on {} days, busiest day: {}",
        heatmap.total_count,
        heatmap.days.len(),
        heatmap.max_count
    );
}

pub fn streaks(streaks: &StreakStats, output: &Output) {
    if output.is_quiet() {
        return;
    }

    section("Streaks");
    let mut table = new_table(&["Metric", "Value"]);
    let current = if streaks.current_streak > 0 {
        format!("{} weeks", streaks.current_streak).green().to_string()
    } else {
        "0 weeks".dimmed().to_string()
    };
    table.add_row(vec![Cell::new("Current Streak"), Cell::new(current)]);
    table.add_row(vec![
        Cell::new("Longest Streak"),
        Cell::new(format!("{} weeks", streaks.longest_streak)),
    ]);
    table.add_row(vec![
        Cell::new("Movies per Month"),
        number(format!("{:.1}", streaks.avg_movies_per_month)),
    ]);
    table.add_row(vec![
        Cell::new("Days Since Last Watch"),
        number(streaks.days_since_last_watch),
    ]);
    println!("{}", table);
}

fn people_table(title: &str, people: &[PersonStat]) {
    section(title);
    if people.is_empty() {
        println!("Nobody yet");
        return;
    }
    let mut table = new_table(&["#", "Name", "Movies", "Avg Rating"]);
    for (rank, person) in people.iter().enumerate() {
        table.add_row(vec![
            number(rank + 1),
            Cell::new(&person.name),
            number(person.count),
            number(format!("{:.2}", person.avg_rating)),
        ]);
    }
    println!("{}", table);
}

pub fn people(people: &PeopleRanking, output: &Output) {
    if output.is_quiet() {
        return;
    }

    people_table("Top Directors", &people.directors);
    people_table("Top Actors", &people.actors);
}

pub fn show(analytics: &ShowAnalytics, output: &Output) {
    if output.is_quiet() || !analytics.has_data() {
        return;
    }

    section(&format!("Show {}", analytics.show_id));
    let trend = match analytics.trend {
        Trend::Improving => analytics.trend.to_string().green().to_string(),
        Trend::Declining => analytics.trend.to_string().red().to_string(),
        Trend::Stable => analytics.trend.to_string().yellow().to_string(),
    };

    let mut table = new_table(&["Metric", "Value"]);
    table.add_row(vec![Cell::new("Episodes"), number(analytics.total_episodes)]);
    table.add_row(vec![
        Cell::new("Average Rating"),
        number(format!("{:.2}", analytics.average_rating)),
    ]);
    if let Some(best) = &analytics.best_episode {
        table.add_row(vec![
            Cell::new("Best Episode"),
            Cell::new(format!(
                "S{:02}E{:02} {} ({:.1})",
                best.season_number, best.episode_number, best.name, best.vote_average
            )),
        ]);
    }
    if let Some(worst) = &analytics.worst_episode {
        table.add_row(vec![
            Cell::new("Worst Episode"),
            Cell::new(format!(
                "S{:02}E{:02} {} ({:.1})",
                worst.season_number, worst.episode_number, worst.name, worst.vote_average
            )),
        ]);
    }
    table.add_row(vec![Cell::new("Trend"), Cell::new(trend)]);
    println!("{}", table);

    section("Seasons");
    let mut table = new_table(&["Season", "Episodes", "Avg Rating"]);
    for season in &analytics.season_averages {
        table.add_row(vec![
            number(season.season_number),
            number(season.episode_count),
            number(format!("{:.2}", season.average_rating)),
        ]);
    }
    println!("{}", table);
}

use super::input::load_episodes;
use crate::output::Output;
use crate::render;
use color_eyre::Result;
use std::path::Path;
use watch_stats_core::StatsEngine;

pub async fn run_show(engine: &StatsEngine, input: &Path, show_id: u64, output: &Output) -> Result<()> {
    let episodes = load_episodes(input, output).await?;
    let analytics = engine.show(show_id, &episodes);

    if !analytics.has_data() {
        output.warn(format!("No rated episodes found for show {}", show_id));
    }

    if output.is_human() {
        render::show(&analytics, output);
        Ok(())
    } else {
        output.data(&analytics)
    }
}

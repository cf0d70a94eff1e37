use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::PathBuf;
use watch_stats_config::Config;

pub fn run_show(config: &Config, config_path: &PathBuf, output: &Output) -> Result<()> {
    if !output.is_human() {
        return output.data(&json!({
            "path": config_path.display().to_string(),
            "exists": config_path.exists(),
            "config": config,
        }));
    }

    if output.is_quiet() {
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_path.exists() {
        output.warn(format!(
            "No configuration file at {}; showing defaults. Run 'reelstats config init' to create one.",
            config_path.display()
        ));
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Config File"), Cell::new(config_path.display().to_string())]);
    table.add_row(vec![
        Cell::new("Trend Threshold"),
        Cell::new(format!("{:.2}", config.analytics.trend_threshold)),
    ]);
    table.add_row(vec![Cell::new("Default Top-N"), Cell::new(config.analytics.default_top_n)]);
    table.add_row(vec![Cell::new("Max Top-N"), Cell::new(config.analytics.max_top_n)]);
    table.add_row(vec![
        Cell::new("Heatmap Years"),
        Cell::new(format!(
            "{}..={}",
            config.analytics.heatmap_min_year, config.analytics.heatmap_max_year
        )),
    ]);
    table.add_row(vec![Cell::new("Log Level"), Cell::new(&config.logging.level)]);
    table.add_row(vec![
        Cell::new("JSON Logs"),
        Cell::new(if config.logging.json { "✓".green().to_string() } else { "✗".red().to_string() }),
    ]);
    table.add_row(vec![
        Cell::new("Log File"),
        Cell::new(
            config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stderr".to_string()),
        ),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    println!("{}", table);

    Ok(())
}

pub fn run_init(config_path: &PathBuf, force: bool, output: &Output) -> Result<()> {
    if config_path.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {}. Use --force to overwrite it.",
            config_path.display()
        ));
    }

    Config::default()
        .save_to_file(config_path)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_path.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_path.display()));
    Ok(())
}

pub fn run_path(config_path: &PathBuf, output: &Output) -> Result<()> {
    if output.is_human() {
        println!("{}", config_path.display());
        Ok(())
    } else {
        output.data(&json!({ "path": config_path.display().to_string() }))
    }
}

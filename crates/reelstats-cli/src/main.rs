use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, show, stats};
use std::path::PathBuf;
use watch_stats_config::{Config, PathManager};
use watch_stats_core::StatsEngine;

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "reelstats")]
#[command(about = "ReelStats - Insights from everything you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rating distribution, genre and decade rollups, monthly timeline
    #[command(long_about = "Summarize a watch history export: headline counters, the half-star rating histogram, genre and decade rollups, and the monthly timeline (most recent month first).")]
    Overview {
        /// Watch history export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Daily activity heatmap for one year
    Heatmap {
        /// Watch history export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,

        /// Calendar year (defaults to the latest year with activity)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i64>,
    },
    /// Weekly watching streaks and recency
    Streaks {
        /// Watch history export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,
    },
    /// Top directors and actors
    People {
        /// Watch history export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,

        /// Number of people per ranking (defaults to the configured top-N)
        #[arg(long, short, allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Season and episode analytics for one TV show
    #[command(long_about = "Analyze episode ratings of a single show: best and worst episodes, per-season averages and whether the show is improving, declining or stable.")]
    Show {
        /// Episode ratings export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,

        /// Show to analyze
        #[arg(long)]
        show_id: u64,
    },
    /// Every per-user aggregate in one payload
    Dashboard {
        /// Watch history export (.json or .csv)
        #[arg(long, short)]
        input: PathBuf,

        /// Heatmap year (defaults to the latest year with activity)
        #[arg(long, allow_negative_numbers = true)]
        year: Option<i64>,

        /// Number of people per ranking
        #[arg(long, short, allow_negative_numbers = true)]
        limit: Option<i64>,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_name = "DATE")]
        as_of: Option<NaiveDate>,

        /// Run the aggregators as parallel tasks
        #[arg(long, action = ArgAction::SetTrue)]
        concurrent: bool,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathManager::default().config_file());
    let app_config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;

    logging::init_logging(cli.verbose, cli.quiet, &app_config.logging).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    if let Commands::Config { cmd } = cli.command {
        return match cmd {
            ConfigCommands::Show => config::run_show(&app_config, &config_path, &output),
            ConfigCommands::Init { force } => config::run_init(&config_path, force, &output),
            ConfigCommands::Path => config::run_path(&config_path, &output),
        };
    }

    app_config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_path.display(), e))?;
    let engine = StatsEngine::new(app_config.analytics.clone())?;

    match cli.command {
        Commands::Overview { input } => stats::run_overview(&engine, &input, &output).await,
        Commands::Heatmap { input, year } => stats::run_heatmap(&engine, &input, year, &output).await,
        Commands::Streaks { input, as_of } => stats::run_streaks(&engine, &input, as_of, &output).await,
        Commands::People { input, limit } => stats::run_people(&engine, &input, limit, &output).await,
        Commands::Show { input, show_id } => show::run_show(&engine, &input, show_id, &output).await,
        Commands::Dashboard {
            input,
            year,
            limit,
            as_of,
            concurrent,
        } => {
            let options = stats::DashboardOptions {
                year,
                limit,
                as_of,
                concurrent,
            };
            stats::run_dashboard(&engine, &input, options, &output).await
        }
        // Handled above
        Commands::Config { .. } => Ok(()),
    }
}

//! saveserve CLI - drive the SaveServe widgets from a terminal
//!
//! Subcommands mirror the interactive pieces of the site:
//! - `submit`: the "Get Involved" contact form (validation, local log, email relay)
//! - `story`: the impact narrative for a food item
//! - `chart`: demand curve paths, optionally after a simulated forecast refresh
//! - `scroll`: the scroll progress marker
//! - `pickup`: rescheduling a pickup slot
//! - `widget`: the confirm/dispatch/accept-decline cards
//! - `submissions`: the local submission log

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use saveserve_core::SaveServeConfig;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "saveserve",
    author,
    version,
    about = "Drive the SaveServe demo widgets from the command line"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.saveserve/config.toml)
    #[arg(long, global = true, env = "SAVESERVE_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit the contact form (validates, logs locally, relays by email)
    Submit(commands::submit::SubmitArgs),
    /// Generate a short impact story for a food item
    Story(commands::story::StoryArgs),
    /// Render a demand curve as an SVG path
    Chart(commands::chart::ChartArgs),
    /// Compute the scroll progress marker position
    Scroll(commands::scroll::ScrollArgs),
    /// Reschedule a pickup slot
    Pickup(commands::pickup::PickupArgs),
    /// Run one of the mock action cards
    Widget(commands::widget::WidgetArgs),
    /// List the local submission log as JSON
    Submissions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_files = saveserve_core::config::load_dotenv();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    saveserve_core::config::log_dotenv(&env_files);

    let config = SaveServeConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Submit(args) => commands::submit::run_submit(args, &config).await,
        Commands::Story(args) => commands::story::run_story(args, &config).await,
        Commands::Chart(args) => commands::chart::run_chart(args).await,
        Commands::Scroll(args) => commands::scroll::run_scroll(args),
        Commands::Pickup(args) => commands::pickup::run_pickup(args),
        Commands::Widget(args) => commands::widget::run_widget(args).await,
        Commands::Submissions => commands::submit::run_list(&config),
    }
}

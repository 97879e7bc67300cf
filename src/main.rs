// Schedule Layout
// Command-line entry point: lays out a schedule snapshot and prints it as JSON

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;

use schedule_layout::models::settings::LayoutSettings;
use schedule_layout::services::layout::{LayoutEngine, ViewportState};
use schedule_layout::services::schedule::{DisplayOverrides, ScheduleResponse, ScheduleSnapshot};
use schedule_layout::services::settings::SettingsService;

#[derive(Parser)]
#[command(name = "schedule-layout", version, about = "Lay out a calendar schedule snapshot")]
struct Cli {
    /// Schedule JSON as returned by the backend (`window` + `events`)
    schedule: PathBuf,

    /// First day to lay out; defaults to the schedule window start, then today
    #[arg(long)]
    day: Option<NaiveDate>,

    /// Number of day columns in the viewport
    #[arg(long, default_value_t = 1)]
    days: u32,

    /// Day column width in pixels
    #[arg(long, default_value_t = 120.0)]
    column_width: f32,

    /// IANA timezone overriding the configured one
    #[arg(long)]
    tz: Option<String>,

    /// Settings file; defaults to the platform config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event id to draw highlighted
    #[arg(long)]
    focus: Option<String>,

    /// Event ids to leave out of the layout
    #[arg(long = "hide")]
    hidden: Vec<String>,
}

fn load_settings(cli: &Cli) -> Result<LayoutSettings> {
    let mut settings = match &cli.config {
        Some(path) => SettingsService::new(path)
            .load()
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => SettingsService::from_default_location()
            .map(|service| service.load_or_default())
            .unwrap_or_default(),
    };

    if let Some(tz) = &cli.tz {
        settings.timezone = tz.clone();
    }
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid settings: {}", e))?;
    Ok(settings)
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let response = ScheduleResponse::from_file(&cli.schedule)
        .with_context(|| format!("Failed to load schedule {}", cli.schedule.display()))?;

    let tz = settings.tz().unwrap_or(chrono_tz::Tz::UTC);
    let day = cli
        .day
        .or_else(|| response.window.as_ref().map(|w| w.start_date))
        .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());

    let overrides = DisplayOverrides {
        hidden: cli.hidden.iter().cloned().collect(),
        ..DisplayOverrides::default()
    };
    let snapshot = ScheduleSnapshot::from_response(response, &overrides);
    log::info!("Laying out {} events from {}", snapshot.len(), day);

    let viewport = ViewportState {
        scroll_x: 0.0,
        scroll_y: 0.0,
        width: cli.days.max(1) as f32 * cli.column_width,
        height: settings.grid_top_inset + 24.0 * settings.hour_height,
        day_column_width: cli.column_width,
    };

    let mut engine = LayoutEngine::from_settings(settings, day);
    engine.replace_snapshot(snapshot);
    engine.set_focus(cli.focus.clone());

    let now = Utc::now();
    // All-day height lags one frame; settle it before reporting.
    engine.frame(&viewport, now);
    let frame = engine.frame(&viewport, now);
    let output = serde_json::to_string_pretty(&frame).context("Failed to serialize layout")?;
    println!("{}", output);

    Ok(())
}

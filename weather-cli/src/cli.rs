use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{Config, WeatherQueryService};

use crate::{
    emoji::EmojiTable,
    output::{DisplayMode, Renderer},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "A weather CLI tool")]
pub struct Cli {
    /// Log cache and network activity to stderr.
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap APPID and a default location.
    Configure,

    /// Show weather for a location.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Location to get weather for, e.g. "Glasgow,uk".
    #[arg(short, long)]
    pub location: Option<String>,

    /// Get the forecast for tomorrow.
    #[arg(short, long)]
    pub tomorrow: bool,

    /// Show weather as emoji.
    #[arg(short, long, conflicts_with = "detail")]
    pub emoji: bool,

    /// Include the provider's full condition text.
    #[arg(short, long)]
    pub detail: bool,

    /// OpenWeatherMap APPID.
    #[arg(short, long, value_name = "APPID", env = "OPEN_WEATHER_MAP_APPID", hide_env_values = true)]
    pub appid: Option<String>,
}

impl ShowArgs {
    fn display_mode(&self) -> DisplayMode {
        if self.emoji {
            DisplayMode::Emoji
        } else if self.detail {
            DisplayMode::Detailed
        } else {
            DisplayMode::Text
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => show(args).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let mut prompt = Password::new("OpenWeatherMap APPID:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked);
    if cfg.app_id.is_some() {
        prompt = prompt.with_help_message("Leave empty to keep the current key");
    }
    let app_id = prompt.prompt().context("Failed to read APPID")?;
    if !app_id.trim().is_empty() {
        cfg.app_id = Some(app_id.trim().to_string());
    }

    let current = cfg.resolve_location(None);
    let location = Text::new("Default location:")
        .with_default(&current)
        .with_help_message("Place name, optionally suffixed with ,<country code>")
        .prompt()
        .context("Failed to read default location")?;
    cfg.default_location = non_blank(&location);

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

async fn show(args: ShowArgs) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let location = cfg.resolve_location(args.location.as_deref());
    let app_id = cfg.resolve_app_id(args.appid.as_deref())?;
    debug!(%location, tomorrow = args.tomorrow, "running weather query");

    let service = WeatherQueryService::from_config(&cfg, app_id)?;
    let renderer = Renderer::new(args.display_mode(), EmojiTable::default());

    if args.tomorrow {
        let slots = service.next_day_forecast(&location).await?;
        if slots.is_empty() {
            println!("No forecast available for tomorrow in {location}");
        }
        for line in renderer.slots(&slots) {
            println!("{line}");
        }
    } else {
        let obs = service.current_weather(&location).await?;
        println!("{}", renderer.current(&obs));
    }

    Ok(())
}

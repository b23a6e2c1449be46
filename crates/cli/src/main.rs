mod commands;
mod config;
mod views;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domain::models::{
    care_event::CareEventType,
    identification::Organ,
    plant::{PlantSort, SortOrder},
};
use uuid::Uuid;

use crate::{commands::App, config::Config};

#[derive(Parser, Debug)]
#[command(name = "plantcare", about = "Track plants, pots and care reminders", version)]
struct Cli {
    /// Path to the config file (defaults to the user config dir)
    #[arg(long, env = "PLANTCARE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, e.g. http://localhost:8000/api
    #[arg(long, env = "PLANTCARE_API_URL", global = true)]
    api_url: Option<String>,

    /// File the auth token is persisted in
    #[arg(long, env = "PLANTCARE_STORAGE_PATH", global = true)]
    storage_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PLANTCARE_LOG", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the token
    Login(Credentials),
    /// Forget the stored token
    Logout,
    /// Create the account on a fresh backend
    Setup(Credentials),
    #[command(subcommand)]
    Plants(PlantCommand),
    #[command(subcommand)]
    Pots(PotCommand),
    #[command(subcommand)]
    Reminders(ReminderCommand),
    /// Identify a plant species from a photo
    Identify {
        image: PathBuf,
        #[arg(long, default_value_t = Organ::Leaf)]
        organ: Organ,
    },
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
pub struct Credentials {
    #[arg(long, short)]
    pub username: String,
    /// Prompted for when omitted
    #[arg(long, env = "PLANTCARE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PlantCommand {
    List {
        #[arg(long)]
        sort: Option<PlantSort>,
        #[arg(long)]
        order: Option<SortOrder>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        needs_water: bool,
    },
    Show {
        id: Uuid,
    },
    Add {
        name: String,
        #[arg(long)]
        species: Option<String>,
    },
    Delete {
        id: Uuid,
    },
    /// Record a care event (defaults to now)
    Care {
        id: Uuid,
        #[arg(value_parser = parse_care_event)]
        kind: CareEventType,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Attach a photo to a plant
    Photo {
        id: Uuid,
        file: PathBuf,
        #[arg(long)]
        primary: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum PotCommand {
    List {
        /// Only pots with no plant in them
        #[arg(long)]
        available: bool,
    },
    Add {
        name: String,
        #[arg(long)]
        diameter_cm: f64,
        #[arg(long)]
        height_cm: f64,
    },
    Delete {
        id: Uuid,
    },
    /// Put a pot in a plant's care, or free it with no --plant
    Assign {
        pot: Uuid,
        #[arg(long)]
        plant: Option<Uuid>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReminderCommand {
    List,
    Upcoming {
        #[arg(long, default_value_t = services::services::reminders::DEFAULT_UPCOMING_DAYS)]
        days: u32,
    },
    Overdue,
    Complete {
        id: Uuid,
    },
    Snooze {
        id: Uuid,
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },
    Delete {
        id: Uuid,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Show or set the PlantNet API key
    Plantnet {
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Show reminder defaults
    Reminders,
}

/// Accepts the verb forms used on the command line as well as the wire names
fn parse_care_event(value: &str) -> Result<CareEventType, String> {
    match value.to_ascii_lowercase().as_str() {
        "water" | "watered" => Ok(CareEventType::Watered),
        "fertilize" | "fertilized" => Ok(CareEventType::Fertilized),
        "repot" | "repotted" => Ok(CareEventType::Repotted),
        other => Err(format!(
            "unknown care event '{}', expected water, fertilize or repot",
            other
        )),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(storage_path) = cli.storage_path {
        config.storage_path = Some(storage_path);
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    utils::logging::init_tracing(&config.log_level);
    tracing::debug!(api_url = %config.api_url, "Starting plantcare");

    let app = App::new(&config)?;
    let output = app.run(cli.command).await?;
    print!("{}", output);
    Ok(())
}

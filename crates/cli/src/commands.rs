use std::path::Path;

use anyhow::{Context, bail};
use chrono::Utc;
use domain::models::{
    photo::FileUpload,
    plant::{PlantCreate, PlantListQuery},
    pot::PotCreate,
    settings::PlantNetSettingsUpdate,
};
use services::services::{
    api_client::ApiClient,
    auth::AuthService,
    auth_store::AuthStore,
    identify::IdentifyService,
    plants::PlantService,
    pot_assignment::sync_pot_assignment,
    pots::PotService,
    reminders::ReminderService,
    session::Session,
    settings::SettingsService,
};
use tracing::info;
use utils::local_storage::LocalStorage;

use crate::{
    Command, Credentials, PlantCommand, PotCommand, ReminderCommand, SettingsCommand,
    config::Config, views,
};

/// Services wired to one API client and session
pub struct App {
    auth_store: AuthStore,
    auth: AuthService,
    plants: PlantService,
    pots: PotService,
    reminders: ReminderService,
    settings: SettingsService,
    identify: IdentifyService,
}

impl App {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let session = match config.storage_path() {
            Some(path) => Session::persistent(LocalStorage::new(path)),
            None => Session::in_memory(),
        };
        let client = ApiClient::new(&config.api_url, session)?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            auth_store: AuthStore::new(client.clone()),
            auth: AuthService::new(client.clone()),
            plants: PlantService::new(client.clone()),
            pots: PotService::new(client.clone()),
            reminders: ReminderService::new(client.clone()),
            settings: SettingsService::new(client.clone()),
            identify: IdentifyService::new(client),
        }
    }

    /// Execute one command and return what should be printed
    pub async fn run(&self, command: Command) -> anyhow::Result<String> {
        match command {
            Command::Login(credentials) => self.login(credentials).await,
            Command::Logout => {
                self.auth_store.logout();
                Ok("Signed out.\n".to_string())
            }
            Command::Setup(credentials) => {
                let password = password_for(&credentials)?;
                let response = self.auth.setup(&credentials.username, &password).await?;
                Ok(format!("{} ({})\n", response.message, response.username))
            }
            Command::Plants(command) => self.plants(command).await,
            Command::Pots(command) => self.pots(command).await,
            Command::Reminders(command) => self.reminders(command).await,
            Command::Identify { image, organ } => {
                let upload = read_upload(&image)?;
                let response = self.identify.identify(upload, organ).await?;
                Ok(views::identify_results(&response))
            }
            Command::Settings(command) => self.settings(command).await,
        }
    }

    async fn login(&self, credentials: Credentials) -> anyhow::Result<String> {
        let password = password_for(&credentials)?;
        if self.auth_store.login(&credentials.username, &password).await {
            Ok(format!("Signed in as {}.\n", credentials.username))
        } else {
            let state = self.auth_store.state();
            bail!(state.error.unwrap_or_else(|| "Sign-in failed".to_string()))
        }
    }

    async fn plants(&self, command: PlantCommand) -> anyhow::Result<String> {
        match command {
            PlantCommand::List {
                sort,
                order,
                search,
                species,
                needs_water,
            } => {
                let query = PlantListQuery {
                    sort,
                    order,
                    search,
                    species,
                    needs_water: needs_water.then_some(true),
                };
                let plants = self.plants.list(&query).await?;
                Ok(views::plant_list(&plants))
            }
            PlantCommand::Show { id } => {
                let detail = self.plants.get(id).await?;
                let history = self.plants.care_history(id, None).await?;
                Ok(views::plant_detail(&detail, &history))
            }
            PlantCommand::Add { name, species } => {
                let plant = self
                    .plants
                    .create(&PlantCreate {
                        name,
                        species,
                        pot_id: None,
                    })
                    .await?;
                Ok(views::plant_card(&plant))
            }
            PlantCommand::Delete { id } => {
                self.plants.delete(id).await?;
                Ok("Plant deleted.\n".to_string())
            }
            PlantCommand::Care { id, kind, notes } => {
                let event = self.plants.record_care_event(id, kind, notes, None).await?;
                Ok(views::care_history(std::slice::from_ref(&event)))
            }
            PlantCommand::Photo { id, file, primary } => {
                let photo = self.plants.upload_photo(id, read_upload(&file)?, primary).await?;
                Ok(format!("Uploaded {}\n", views::photo_url(&photo.url)))
            }
        }
    }

    async fn pots(&self, command: PotCommand) -> anyhow::Result<String> {
        match command {
            PotCommand::List { available } => {
                let pots = if available {
                    self.pots.list_available().await?
                } else {
                    self.pots.list().await?
                };
                Ok(views::pot_list(&pots))
            }
            PotCommand::Add {
                name,
                diameter_cm,
                height_cm,
            } => {
                let pot = self
                    .pots
                    .create(&PotCreate {
                        name,
                        diameter_cm,
                        height_cm,
                    })
                    .await?;
                Ok(views::pot_card(&pot))
            }
            PotCommand::Delete { id } => {
                self.pots.delete(id).await?;
                Ok("Pot deleted.\n".to_string())
            }
            PotCommand::Assign { pot, plant } => {
                let plants = self.plants.list(&PlantListQuery::default()).await?;
                sync_pot_assignment(&self.plants, pot, plant, &plants).await?;
                info!(pot_id = %pot, plant_id = ?plant, "Pot assignment synced");
                let pot = self.pots.get(pot).await?;
                Ok(views::pot_card(&pot))
            }
        }
    }

    async fn reminders(&self, command: ReminderCommand) -> anyhow::Result<String> {
        let now = Utc::now();
        match command {
            ReminderCommand::List => Ok(views::reminders_page(&self.reminders.list().await?, now)),
            ReminderCommand::Upcoming { days } => {
                Ok(views::reminders_page(&self.reminders.upcoming(days).await?, now))
            }
            ReminderCommand::Overdue => {
                Ok(views::reminders_page(&self.reminders.overdue().await?, now))
            }
            ReminderCommand::Complete { id } => {
                self.reminders.complete(id).await?;
                Ok("Reminder completed.\n".to_string())
            }
            ReminderCommand::Snooze { id, hours } => {
                let reminder = self.reminders.snooze(id, hours).await?;
                Ok(format!(
                    "Snoozed until {}.\n",
                    reminder.next_due.format("%Y-%m-%d %H:%M")
                ))
            }
            ReminderCommand::Delete { id } => {
                self.reminders.delete(id).await?;
                Ok("Reminder deleted.\n".to_string())
            }
        }
    }

    async fn settings(&self, command: SettingsCommand) -> anyhow::Result<String> {
        match command {
            SettingsCommand::Plantnet { api_key } => {
                let settings = match api_key {
                    Some(api_key) => {
                        self.settings
                            .update_plantnet(&PlantNetSettingsUpdate { api_key })
                            .await?
                    }
                    None => self.settings.plantnet().await?,
                };
                Ok(if settings.api_key_configured {
                    format!(
                        "PlantNet API key configured{}\n",
                        settings
                            .api_key_preview
                            .map(|p| format!(" ({})", p))
                            .unwrap_or_default()
                    )
                } else {
                    "PlantNet API key not configured\n".to_string()
                })
            }
            SettingsCommand::Reminders => {
                let settings = self.settings.reminders().await?;
                let interval = |days: Option<u32>| {
                    days.map(|d| format!("every {} days", d))
                        .unwrap_or_else(|| "not set".to_string())
                };
                Ok(format!(
                    "Watering: {}\nFertilizing: {}\nReminder time: {}\n",
                    interval(settings.default_watering_interval),
                    interval(settings.default_fertilizing_interval),
                    settings.preferred_reminder_time.format("%H:%M")
                ))
            }
        }
    }
}

fn password_for(credentials: &Credentials) -> anyhow::Result<String> {
    match &credentials.password {
        Some(password) => Ok(password.clone()),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .context("failed to read password"),
    }
}

fn read_upload(path: &Path) -> anyhow::Result<FileUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
    Ok(FileUpload::new(file_name, mime_type, bytes))
}

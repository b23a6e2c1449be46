//! Plain-text rendering of plants, pots and reminders.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use domain::models::{
    care_event::CareEvent,
    identification::IdentifyResponse,
    plant::{Plant, PlantDetail},
    pot::Pot,
    reminder::Reminder,
};

pub const EMPTY_REMINDERS: &str = "No reminders set up yet.";
pub const EMPTY_PLANTS: &str = "No plants yet.";
pub const EMPTY_POTS: &str = "No pots yet.";
pub const EMPTY_HISTORY: &str = "No care events recorded.";

const UPLOADS_PREFIX: &str = "/uploads/";

/// Bare file names are served from the uploads directory
pub fn photo_url(url: &str) -> String {
    if url.starts_with('/') || url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", UPLOADS_PREFIX, url)
    }
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

fn dimension(value: f64) -> String {
    // 14.0 -> "14", 12.25 -> "12.25"
    value.to_string()
}

pub fn plant_card(plant: &Plant) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plant.name);
    let _ = writeln!(
        out,
        "  {}",
        plant.species.as_deref().unwrap_or("Unknown species")
    );
    if let Some(url) = &plant.primary_photo_url {
        let _ = writeln!(out, "  Photo: {}", photo_url(url));
    }
    if let Some(pot) = &plant.pot {
        let _ = writeln!(out, "  Pot: {}", pot.name);
    }
    match &plant.last_watered {
        Some(ts) => {
            let _ = writeln!(out, "  Watered: {}", date(ts));
        }
        None => {
            let _ = writeln!(out, "  Never watered");
        }
    }
    if let Some(ts) = &plant.last_fertilized {
        let _ = writeln!(out, "  Fertilized: {}", date(ts));
    }
    let _ = writeln!(out, "  /plants/{}", plant.id);
    out
}

pub fn plant_list(plants: &[Plant]) -> String {
    if plants.is_empty() {
        return format!("{}\n", EMPTY_PLANTS);
    }
    plants.iter().map(plant_card).collect::<Vec<_>>().join("\n")
}

pub fn plant_detail(detail: &PlantDetail, history: &[CareEvent]) -> String {
    let mut out = plant_card(detail);
    if let Some(ts) = &detail.last_repotted {
        let _ = writeln!(out, "  Repotted: {}", date(ts));
    }
    if !detail.photos.is_empty() {
        let _ = writeln!(out, "  Photos: {}", detail.photos.len());
    }
    out.push('\n');
    out.push_str(&care_history(history));
    out
}

pub fn care_history(events: &[CareEvent]) -> String {
    if events.is_empty() {
        return format!("{}\n", EMPTY_HISTORY);
    }
    let mut out = String::new();
    for event in events {
        let _ = write!(out, "{}  {}", date(&event.event_date), event.event_type);
        if let Some(notes) = &event.notes {
            let _ = write!(out, "  {}", notes);
        }
        out.push('\n');
    }
    out
}

pub fn pot_card(pot: &Pot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", pot.name);
    let _ = writeln!(
        out,
        "  {}cm × {}cm",
        dimension(pot.diameter_cm),
        dimension(pot.height_cm)
    );
    if let Some(url) = &pot.primary_photo_url {
        let _ = writeln!(out, "  Photo: {}", photo_url(url));
    }
    match &pot.plant_name {
        Some(name) if pot.is_assigned() => {
            let _ = writeln!(out, "  {}", name);
        }
        _ => {
            let _ = writeln!(out, "  Available");
        }
    }
    let _ = writeln!(out, "  /pots/{}", pot.id);
    out
}

pub fn pot_list(pots: &[Pot]) -> String {
    if pots.is_empty() {
        return format!("{}\n", EMPTY_POTS);
    }
    pots.iter().map(pot_card).collect::<Vec<_>>().join("\n")
}

pub fn reminders_page(reminders: &[Reminder], now: DateTime<Utc>) -> String {
    if reminders.is_empty() {
        return format!("{}\n", EMPTY_REMINDERS);
    }

    let mut out = String::new();
    for reminder in reminders {
        let _ = write!(
            out,
            "{}  {}  due {}",
            reminder.reminder_type.label(),
            reminder.plant_name.as_deref().unwrap_or("Unnamed plant"),
            reminder.next_due.format("%Y-%m-%d %H:%M"),
        );
        if reminder.is_overdue(now) {
            out.push_str("  Overdue");
        }
        if !reminder.is_enabled {
            out.push_str("  (disabled)");
        }
        let _ = writeln!(out, "  [{}]", reminder.id);
    }
    out
}

pub fn identify_results(response: &IdentifyResponse) -> String {
    let mut out = String::new();
    if let Some(error) = &response.error {
        let _ = writeln!(out, "Identification failed: {}", error);
    }
    if response.results.is_empty() && response.error.is_none() {
        let _ = writeln!(out, "No matches found.");
    }
    for result in &response.results {
        let _ = write!(
            out,
            "{:>5.1}%  {}",
            result.score * 100.0,
            result.scientific_name
        );
        if !result.common_names.is_empty() {
            let _ = write!(out, " ({})", result.common_names.join(", "));
        }
        let _ = writeln!(out, "  [{}]", result.family);
    }
    if let Some(remaining) = response.remaining_identifications {
        let _ = writeln!(out, "{} identifications left today", remaining);
    }
    out
}

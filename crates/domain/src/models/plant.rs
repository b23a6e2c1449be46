use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use super::{photo::Photo, reminder::Reminder};

/// Reference to the pot a plant lives in, as embedded by some list views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PotRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    pub species: Option<String>,
    /// Source of truth for the pot assignment
    #[serde(default)]
    pub pot_id: Option<Uuid>,
    #[serde(default)]
    pub pot: Option<PotRef>,
    #[serde(default)]
    pub primary_photo_url: Option<String>,
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_fertilized: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_repotted: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plant {
    /// Pot this plant is assigned to, whichever of the two wire shapes carried it
    pub fn assigned_pot_id(&self) -> Option<Uuid> {
        self.pot_id.or_else(|| self.pot.as_ref().map(|pot| pot.id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantDetail {
    #[serde(flatten)]
    pub plant: Plant,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

impl std::ops::Deref for PlantDetail {
    type Target = Plant;
    fn deref(&self) -> &Self::Target {
        &self.plant
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlantCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pot_id: Option<Uuid>,
}

/// Partial update. `pot_id` distinguishes "leave alone" (`None`) from
/// "unassign" (`Some(None)`), which must go over the wire as an explicit null.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub pot_id: Option<Option<Uuid>>,
}

impl PlantUpdate {
    pub fn pot(pot_id: Option<Uuid>) -> Self {
        Self {
            pot_id: Some(pot_id),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlantSort {
    #[default]
    Name,
    Species,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString, Display, Default)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Filters accepted by `GET /plants`
#[derive(Debug, Clone, Default)]
pub struct PlantListQuery {
    pub sort: Option<PlantSort>,
    pub order: Option<SortOrder>,
    pub search: Option<String>,
    pub species: Option<String>,
    pub needs_water: Option<bool>,
}

impl PlantListQuery {
    /// Key/value pairs for the set filters, in a stable order
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(species) = &self.species {
            pairs.push(("species", species.clone()));
        }
        if let Some(needs_water) = self.needs_water {
            pairs.push(("needs_water", needs_water.to_string()));
        }
        pairs
    }
}

//! Keeps the pot/plant relationship one-to-one from the client side.
//!
//! `Plant::pot_id` is the source of truth. Before a pot is given to a plant,
//! every other plant still pointing at it is unassigned, one request at a
//! time, so the backend never sees two owners for the same pot. There is no
//! rollback: if a later step fails, earlier updates stay applied.

use async_trait::async_trait;
use domain::models::plant::{Plant, PlantUpdate};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::{api_client::ApiClientError, plants::PlantService};

#[derive(Debug, Error)]
pub enum PotAssignmentError {
    #[error(transparent)]
    Api(#[from] ApiClientError),
    #[error("Selected plant no longer exists.")]
    PlantNotFound(Uuid),
}

/// The single write reconciliation needs
#[async_trait]
pub trait PlantPotWriter: Send + Sync {
    async fn set_plant_pot(&self, plant_id: Uuid, pot_id: Option<Uuid>) -> Result<(), ApiClientError>;
}

#[async_trait]
impl PlantPotWriter for PlantService {
    async fn set_plant_pot(&self, plant_id: Uuid, pot_id: Option<Uuid>) -> Result<(), ApiClientError> {
        self.update(plant_id, &PlantUpdate::pot(pot_id)).await.map(|_| ())
    }
}

/// Make `selected_plant_id` the only plant in `plants` holding `pot_id`,
/// or leave the pot unassigned when `selected_plant_id` is `None`.
pub async fn sync_pot_assignment<W>(
    writer: &W,
    pot_id: Uuid,
    selected_plant_id: Option<Uuid>,
    plants: &[Plant],
) -> Result<(), PotAssignmentError>
where
    W: PlantPotWriter + ?Sized,
{
    let current_owners = plants
        .iter()
        .filter(|plant| plant.assigned_pot_id() == Some(pot_id) && Some(plant.id) != selected_plant_id);

    for owner in current_owners {
        info!(pot_id = %pot_id, plant_id = %owner.id, "Unassigning pot from previous owner");
        writer.set_plant_pot(owner.id, None).await?;
    }

    let Some(selected_plant_id) = selected_plant_id else {
        return Ok(());
    };

    let selected = plants
        .iter()
        .find(|plant| plant.id == selected_plant_id)
        .ok_or(PotAssignmentError::PlantNotFound(selected_plant_id))?;

    if selected.assigned_pot_id() == Some(pot_id) {
        debug!(pot_id = %pot_id, plant_id = %selected_plant_id, "Pot already assigned");
        return Ok(());
    }

    info!(pot_id = %pot_id, plant_id = %selected_plant_id, "Assigning pot");
    writer.set_plant_pot(selected_plant_id, Some(pot_id)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::services::{
        api_client::ApiClient,
        mock_backend::{MockBackend, MockResponse},
        session::Session,
    };

    /// Applies writes to its own copy of the plants and records them
    struct RecordingWriter {
        plants: Mutex<Vec<Plant>>,
        calls: Mutex<Vec<(Uuid, Option<Uuid>)>>,
        fail_for: Option<Uuid>,
    }

    impl RecordingWriter {
        fn new(plants: &[Plant]) -> Self {
            Self {
                plants: Mutex::new(plants.to_vec()),
                calls: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(plants: &[Plant], plant_id: Uuid) -> Self {
            Self {
                fail_for: Some(plant_id),
                ..Self::new(plants)
            }
        }

        fn calls(&self) -> Vec<(Uuid, Option<Uuid>)> {
            self.calls.lock().unwrap().clone()
        }

        fn plants(&self) -> Vec<Plant> {
            self.plants.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlantPotWriter for RecordingWriter {
        async fn set_plant_pot(&self, plant_id: Uuid, pot_id: Option<Uuid>) -> Result<(), ApiClientError> {
            self.calls.lock().unwrap().push((plant_id, pot_id));
            if self.fail_for == Some(plant_id) {
                return Err(ApiClientError::Http {
                    status: 500,
                    message: "Database unavailable".to_string(),
                    code: None,
                    field_errors: Vec::new(),
                });
            }
            if let Some(plant) = self.plants.lock().unwrap().iter_mut().find(|p| p.id == plant_id) {
                plant.pot_id = pot_id;
            }
            Ok(())
        }
    }

    fn plant(name: &str, pot_id: Option<Uuid>) -> Plant {
        Plant {
            id: Uuid::new_v4(),
            name: name.to_string(),
            species: None,
            pot_id,
            pot: None,
            primary_photo_url: None,
            last_watered: None,
            last_fertilized: None,
            last_repotted: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn owners(plants: &[Plant], pot_id: Uuid) -> Vec<Uuid> {
        plants
            .iter()
            .filter(|p| p.assigned_pot_id() == Some(pot_id))
            .map(|p| p.id)
            .collect()
    }

    #[tokio::test]
    async fn test_moves_pot_from_previous_owner() {
        let p1 = Uuid::new_v4();
        let a = plant("A", None);
        let b = plant("B", Some(p1));
        let plants = vec![a.clone(), b.clone()];
        let writer = RecordingWriter::new(&plants);

        sync_pot_assignment(&writer, p1, Some(a.id), &plants).await.unwrap();

        assert_eq!(writer.calls(), vec![(b.id, None), (a.id, Some(p1))]);
        assert_eq!(owners(&writer.plants(), p1), vec![a.id]);
    }

    #[tokio::test]
    async fn test_already_assigned_is_noop() {
        let p1 = Uuid::new_v4();
        let a = plant("A", Some(p1));
        let plants = vec![a.clone(), plant("B", None)];
        let writer = RecordingWriter::new(&plants);

        sync_pot_assignment(&writer, p1, Some(a.id), &plants).await.unwrap();

        assert!(writer.calls().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_issues_no_calls() {
        let p1 = Uuid::new_v4();
        let a = plant("A", None);
        let plants = vec![a.clone(), plant("B", Some(p1)), plant("C", Some(p1))];
        let writer = RecordingWriter::new(&plants);

        sync_pot_assignment(&writer, p1, Some(a.id), &plants).await.unwrap();
        assert_eq!(writer.calls().len(), 3);

        let refreshed = writer.plants();
        let second = RecordingWriter::new(&refreshed);
        sync_pot_assignment(&second, p1, Some(a.id), &refreshed).await.unwrap();
        assert!(second.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unassign_clears_every_owner() {
        let p1 = Uuid::new_v4();
        let other_pot = Uuid::new_v4();
        let b = plant("B", Some(p1));
        let c = plant("C", Some(other_pot));
        let plants = vec![b.clone(), c.clone()];
        let writer = RecordingWriter::new(&plants);

        sync_pot_assignment(&writer, p1, None, &plants).await.unwrap();

        assert_eq!(writer.calls(), vec![(b.id, None)]);
        assert!(owners(&writer.plants(), p1).is_empty());
        assert_eq!(owners(&writer.plants(), other_pot), vec![c.id]);
    }

    #[tokio::test]
    async fn test_missing_plant_after_clearing_owners() {
        let p1 = Uuid::new_v4();
        let b = plant("B", Some(p1));
        let plants = vec![b.clone()];
        let writer = RecordingWriter::new(&plants);
        let ghost = Uuid::new_v4();

        let err = sync_pot_assignment(&writer, p1, Some(ghost), &plants)
            .await
            .unwrap_err();

        assert!(matches!(err, PotAssignmentError::PlantNotFound(id) if id == ghost));
        assert_eq!(err.to_string(), "Selected plant no longer exists.");
        assert_eq!(writer.calls(), vec![(b.id, None)]);
    }

    #[tokio::test]
    async fn test_failure_stops_remaining_steps() {
        let p1 = Uuid::new_v4();
        let a = plant("A", None);
        let b = plant("B", Some(p1));
        let c = plant("C", Some(p1));
        let plants = vec![a.clone(), b.clone(), c.clone()];
        let writer = RecordingWriter::failing_for(&plants, b.id);

        let err = sync_pot_assignment(&writer, p1, Some(a.id), &plants)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Database unavailable");
        assert_eq!(writer.calls(), vec![(b.id, None)]);
    }

    #[tokio::test]
    async fn test_failed_assign_leaves_pot_unassigned() {
        let p1 = Uuid::new_v4();
        let a = plant("A", None);
        let b = plant("B", Some(p1));
        let plants = vec![a.clone(), b.clone()];
        let writer = RecordingWriter::failing_for(&plants, a.id);

        assert!(sync_pot_assignment(&writer, p1, Some(a.id), &plants).await.is_err());
        assert!(owners(&writer.plants(), p1).is_empty());
    }

    #[tokio::test]
    async fn test_plant_service_issues_ordered_puts() {
        let backend = MockBackend::start().await;
        let p1 = Uuid::new_v4();
        let a = plant("A", None);
        let b = plant("B", Some(p1));
        for (id, pot) in [(a.id, Some(p1)), (b.id, None)] {
            backend.on(
                "PUT",
                &format!("/plants/{}", id),
                MockResponse::json(
                    200,
                    json!({
                        "id": id,
                        "name": "plant",
                        "species": null,
                        "pot_id": pot,
                        "created_at": "2026-01-01T00:00:00Z",
                        "updated_at": "2026-01-01T00:00:00Z"
                    }),
                ),
            );
        }

        let service = PlantService::new(ApiClient::new(backend.base_url(), Session::with_token("t")).unwrap());
        sync_pot_assignment(&service, p1, Some(a.id), &[a.clone(), b.clone()])
            .await
            .unwrap();

        let puts = backend.requests_for("PUT");
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[0].path, format!("/plants/{}", b.id));
        assert_eq!(puts[0].json(), json!({ "pot_id": null }));
        assert_eq!(puts[1].path, format!("/plants/{}", a.id));
        assert_eq!(puts[1].json(), json!({ "pot_id": p1 }));
    }
}

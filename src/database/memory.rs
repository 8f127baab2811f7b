//! Memory storage
//!
//! Will be destroyed on system shutdown

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::destinations::Destination;

use super::CreateDestinationValues;
use super::DestinationFilter;
use super::UpdateDestinationValues;

/// An in-memory storage
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All destinations in storage, in insertion order
    destinations: Arc<Mutex<Vec<Destination>>>,
}

impl Memory {
    /// Create a new empty Memory storage
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_destinations(
        &self,
        filter: &DestinationFilter<'_>,
        limit: usize,
    ) -> Vec<Destination> {
        self.destinations
            .lock()
            .await
            .iter()
            .filter(|destination| filter.matches(destination))
            .take(limit)
            .cloned()
            .collect()
    }

    pub async fn find_single_destination_by_id(&self, id: &Uuid) -> Option<Destination> {
        self.destinations
            .lock()
            .await
            .iter()
            .find(|destination| &destination.id == id)
            .cloned()
    }

    pub async fn create_destination(&self, values: &CreateDestinationValues<'_>) -> Destination {
        let destination = Destination {
            id: Uuid::new_v4(),
            destination_name: values.destination_name.to_string(),
            country: values.country.to_string(),
            description: values.description.to_string(),
            link: values.link.to_string(),
        };

        self.destinations.lock().await.push(destination.clone());

        destination
    }

    pub async fn update_destination(
        &self,
        id: &Uuid,
        values: &UpdateDestinationValues<'_>,
    ) -> Option<Destination> {
        self.destinations
            .lock()
            .await
            .iter_mut()
            .find(|destination| &destination.id == id)
            .map(|destination| {
                if let Some(destination_name) = values.destination_name {
                    destination.destination_name = destination_name.to_string();
                }

                if let Some(country) = values.country {
                    destination.country = country.to_string();
                }

                if let Some(description) = values.description {
                    destination.description = description.to_string();
                }

                if let Some(link) = values.link {
                    destination.link = link.to_string();
                }

                destination.clone()
            })
    }

    pub async fn delete_destination(&self, id: &Uuid) -> bool {
        let mut destinations = self.destinations.lock().await;

        let count = destinations.len();
        destinations.retain(|destination| &destination.id != id);

        destinations.len() != count
    }
}

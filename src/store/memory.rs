use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::models::plant::FleetSnapshot;
use crate::store::{PlantStore, StoreError};

#[derive(Clone, Debug)]
pub struct InMemoryPlantStore {
    snapshot: Arc<RwLock<FleetSnapshot>>,
}

impl InMemoryPlantStore {
    pub fn new() -> Self {
        Self::with_snapshot(FleetSnapshot::empty())
    }

    pub fn with_snapshot(snapshot: FleetSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }
}

impl Default for InMemoryPlantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantStore for InMemoryPlantStore {
    fn replace_all(&self, snapshot: FleetSnapshot) -> Result<(), StoreError> {
        let mut current = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        debug!(
            previous = %current.id,
            snapshot = %snapshot.id,
            plants = snapshot.len(),
            "Replacing fleet snapshot"
        );
        *current = snapshot;
        Ok(())
    }

    fn read_all(&self) -> Result<FleetSnapshot, StoreError> {
        let current = self.snapshot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(current.clone())
    }
}

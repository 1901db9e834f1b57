use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::models::plant::FleetSnapshot;
use crate::store::{PlantStore, StoreError};

/// Snapshot kept in memory and mirrored to a JSON file so the fleet
/// survives a restart.
#[derive(Clone, Debug)]
pub struct JsonFilePlantStore {
    path: PathBuf,
    snapshot: Arc<RwLock<FleetSnapshot>>,
}

impl JsonFilePlantStore {
    /// Opens the store, reading the snapshot from `path` if it exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = if path.exists() {
            let json = std::fs::read_to_string(&path)?;
            let snapshot: FleetSnapshot = serde_json::from_str(&json)?;
            info!(
                path = %path.display(),
                snapshot = %snapshot.id,
                plants = snapshot.len(),
                "Fleet snapshot restored from disk"
            );
            snapshot
        } else {
            info!(path = %path.display(), "No saved fleet found, starting empty");
            FleetSnapshot::empty()
        };

        Ok(Self {
            path,
            snapshot: Arc::new(RwLock::new(snapshot)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, snapshot: &FleetSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), snapshot = %snapshot.id, "Fleet snapshot saved");
        Ok(())
    }
}

impl PlantStore for JsonFilePlantStore {
    fn replace_all(&self, snapshot: FleetSnapshot) -> Result<(), StoreError> {
        // Held across the write so concurrent loads cannot interleave on disk
        let mut current = self.snapshot.write().map_err(|_| StoreError::Poisoned)?;
        self.persist(&snapshot)?;
        *current = snapshot;
        Ok(())
    }

    fn read_all(&self) -> Result<FleetSnapshot, StoreError> {
        let current = self.snapshot.read().map_err(|_| StoreError::Poisoned)?;
        Ok(current.clone())
    }
}

//! Plant store: holds the most recently loaded fleet snapshot.
//!
//! `replace_all` swaps the whole snapshot atomically; `read_all` returns a
//! copy of it. Readers always see the plants in the order of the last load.

pub mod file;
pub mod memory;

use thiserror::Error;

use crate::models::plant::FleetSnapshot;

pub use file::JsonFilePlantStore;
pub use memory::InMemoryPlantStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("fleet snapshot lock poisoned")]
    Poisoned,

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg_attr(test, mockall::automock)]
pub trait PlantStore: Send + Sync {
    /// Replaces the current snapshot wholesale.
    fn replace_all(&self, snapshot: FleetSnapshot) -> Result<(), StoreError>;

    /// Returns the current snapshot (empty before the first load).
    fn read_all(&self) -> Result<FleetSnapshot, StoreError>;
}

use std::sync::Arc;
use std::time::Instant;

use crate::services::fleet_service::FleetService;
use crate::store::PlantStore;

#[derive(Clone)]
pub struct AppState {
    /// Simulation service backed by the injected plant store
    pub fleet: FleetService,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self {
            fleet: FleetService::new(store),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

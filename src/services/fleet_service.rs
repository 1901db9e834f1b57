use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{ServiceError, ServiceResult, Stage};
use crate::models::plant::{FleetSnapshot, Plant, PlantOutput, PlantRequest, UploadResponse};
use crate::services::output_simulator;
use crate::store::{PlantStore, StoreError};

/// Service boundary between the HTTP layer and the simulator.
///
/// Validates raw input, runs the simulation and wraps every store failure
/// in a `ServiceError::Store` tagged with the operation that failed.
#[derive(Clone)]
pub struct FleetService {
    store: Arc<dyn PlantStore>,
}

impl FleetService {
    pub fn new(store: Arc<dyn PlantStore>) -> Self {
        Self { store }
    }

    /// Simulates an uploaded fleet without touching the store.
    pub fn calculate_energy_production(
        &self,
        plants: &[PlantRequest],
        days: i64,
    ) -> ServiceResult<UploadResponse> {
        let days = validate_days(days)?;
        let plants = validate_plants(plants)?;
        let result = output_simulator::simulate_fleet(&plants, days);

        info!(
            plants = plants.len(),
            days,
            produced_kwh = result.total_energy_kwh,
            "Uploaded fleet simulated"
        );
        Ok(UploadResponse {
            produced_kwh: result.total_energy_kwh,
            network: result.updated_plants,
        })
    }

    /// Clears the previous fleet and stores the given one.
    pub fn load_network(&self, plants: &[PlantRequest]) -> ServiceResult<()> {
        let plants = validate_plants(plants)?;
        let snapshot = FleetSnapshot::new(plants);
        if snapshot.is_empty() {
            warn!("Loading an empty fleet; previous plants will be discarded");
        }
        let id = snapshot.id;
        let count = snapshot.len();

        self.store
            .replace_all(snapshot)
            .map_err(|e| store_failure(Stage::Load, e))?;

        info!(snapshot = %id, plants = count, "Fleet loaded");
        Ok(())
    }

    /// Total energy (kWh) the stored fleet produces over `days`.
    pub fn total_output(&self, days: i64) -> ServiceResult<f64> {
        let days = validate_days(days)?;
        let snapshot = self
            .store
            .read_all()
            .map_err(|e| store_failure(Stage::TotalOutput, e))?;
        Ok(output_simulator::total_output(&snapshot.plants, days))
    }

    /// Per-plant age and output of the stored fleet after `days`.
    pub fn network_state(&self, days: i64) -> ServiceResult<Vec<PlantOutput>> {
        let days = validate_days(days)?;
        let snapshot = self
            .store
            .read_all()
            .map_err(|e| store_failure(Stage::NetworkState, e))?;
        Ok(output_simulator::simulate_against_store(&snapshot, days))
    }

    pub fn fleet_size(&self) -> ServiceResult<usize> {
        let snapshot = self
            .store
            .read_all()
            .map_err(|e| store_failure(Stage::Health, e))?;
        Ok(snapshot.len())
    }
}

fn store_failure(stage: Stage, source: StoreError) -> ServiceError {
    error!(stage = %stage, error = %source, "Plant store operation failed");
    ServiceError::store(stage, source)
}

pub fn validate_days(days: i64) -> ServiceResult<u64> {
    u64::try_from(days)
        .map_err(|_| ServiceError::invalid(format!("days must not be negative, got {days}")))
}

pub fn validate_plants(plants: &[PlantRequest]) -> ServiceResult<Vec<Plant>> {
    plants
        .iter()
        .map(|p| match u64::try_from(p.age) {
            Ok(age) => Ok(Plant::new(p.name.clone(), age)),
            Err(_) => Err(ServiceError::invalid(format!(
                "age of plant '{}' must not be negative, got {}",
                p.name, p.age
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPlantStore, MockPlantStore};

    fn plant1() -> PlantRequest {
        PlantRequest::new("Plant 1", 100)
    }

    fn plant2() -> PlantRequest {
        PlantRequest::new("Plant 2", 250)
    }

    fn service_with(store: MockPlantStore) -> FleetService {
        FleetService::new(Arc::new(store))
    }

    fn service_reading(plants: Vec<Plant>) -> FleetService {
        let mut store = MockPlantStore::new();
        store
            .expect_read_all()
            .times(1)
            .returning(move || Ok(FleetSnapshot::new(plants.clone())));
        service_with(store)
    }

    fn failing_reads() -> FleetService {
        let mut store = MockPlantStore::new();
        store
            .expect_read_all()
            .times(1)
            .returning(|| Err(StoreError::Poisoned));
        service_with(store)
    }

    // ── Upload ───────────────────────────────────────────────────────────────

    #[test]
    fn test_upload_empty_list_returns_zero() {
        let service = service_with(MockPlantStore::new());
        let response = service.calculate_energy_production(&[], 10).unwrap();
        assert_eq!(response.produced_kwh, 0.0);
        assert!(response.network.is_empty());
    }

    #[test]
    fn test_upload_zero_days_keeps_ages() {
        let service = service_with(MockPlantStore::new());
        let response = service.calculate_energy_production(&[plant1()], 0).unwrap();
        assert_eq!(response.produced_kwh, 0.0);
        assert_eq!(response.network.len(), 1);
        assert_eq!(response.network[0].name, "Plant 1");
        assert_eq!(response.network[0].age, 100);
    }

    #[test]
    fn test_upload_multiple_plants() {
        let service = service_with(MockPlantStore::new());
        let plants = [plant1(), plant2()];
        let response = service.calculate_energy_production(&plants, 5).unwrap();

        assert_eq!(response.produced_kwh, 546.616626008632);
        assert_eq!(response.network.len(), plants.len());
        for (req, updated) in plants.iter().zip(&response.network) {
            assert_eq!(updated.name, req.name);
            assert_eq!(updated.age as i64, req.age + 5);
        }
    }

    #[test]
    fn test_upload_rejects_negative_input() {
        let service = service_with(MockPlantStore::new());
        let err = service.calculate_energy_production(&[plant1()], -1).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));

        let err = service
            .calculate_energy_production(&[PlantRequest::new("Broken", -5)], 1)
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    // ── Load ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_load_replaces_store_contents() {
        let mut store = MockPlantStore::new();
        store
            .expect_replace_all()
            .withf(|snapshot| {
                snapshot.plants == vec![Plant::new("Plant1", 10), Plant::new("Plant2", 5)]
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = service_with(store);

        service
            .load_network(&[PlantRequest::new("Plant1", 10), PlantRequest::new("Plant2", 5)])
            .unwrap();
    }

    #[test]
    fn test_load_failure_is_tagged() {
        let mut store = MockPlantStore::new();
        store
            .expect_replace_all()
            .times(1)
            .returning(|_| Err(StoreError::Io(std::io::Error::other("disk full"))));
        let service = service_with(store);

        let err = service.load_network(&[plant1()]).unwrap_err();
        assert_eq!(err.to_string(), "load failed");
        match err {
            ServiceError::Store { stage, source } => {
                assert_eq!(stage, Stage::Load);
                assert!(source.to_string().contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_negative_age_before_store() {
        // No expectation set: touching the store would panic
        let service = service_with(MockPlantStore::new());
        let err = service.load_network(&[PlantRequest::new("Broken", -1)]).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    // ── Total output ─────────────────────────────────────────────────────────

    #[test]
    fn test_total_output() {
        let service = service_reading(vec![Plant::new("Plant 1", 875), Plant::new("Plant 2", 475)]);
        assert_eq!(service.total_output(2).unwrap(), 217.14993432163632);
    }

    #[test]
    fn test_total_output_failure_is_tagged() {
        let err = failing_reads().total_output(2).unwrap_err();
        assert!(matches!(err, ServiceError::Store { stage: Stage::TotalOutput, .. }));
        assert_eq!(err.to_string(), "total-output failed");
    }

    // ── Network state ────────────────────────────────────────────────────────

    #[test]
    fn test_network_state() {
        let service = service_reading(vec![Plant::new("Plant 1", 875), Plant::new("Plant 2", 570)]);
        let outputs = service.network_state(2).unwrap();
        assert_eq!(outputs[0].output_in_kwh, 108.27472321261024);
        assert_eq!(outputs[1].output_in_kwh, 108.73259523362731);
        assert_eq!(outputs[0].age, 877);
        assert_eq!(outputs[1].age, 572);
    }

    #[test]
    fn test_network_state_failure_is_tagged() {
        let err = failing_reads().network_state(2).unwrap_err();
        assert!(matches!(err, ServiceError::Store { stage: Stage::NetworkState, .. }));
        assert_eq!(err.to_string(), "network-state failed");
    }

    // ── Against a real store ─────────────────────────────────────────────────

    #[test]
    fn test_load_then_query_in_memory() {
        let service = FleetService::new(Arc::new(InMemoryPlantStore::new()));
        assert_eq!(service.total_output(10).unwrap(), 0.0);

        service.load_network(&[plant2(), plant1()]).unwrap();
        assert_eq!(service.fleet_size().unwrap(), 2);

        let state = service.network_state(5).unwrap();
        let names: Vec<_> = state.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Plant 2", "Plant 1"]);

        service.load_network(&[plant1()]).unwrap();
        assert_eq!(service.fleet_size().unwrap(), 1);
    }
}

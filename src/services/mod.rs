pub mod fleet_service;
pub mod output_simulator;

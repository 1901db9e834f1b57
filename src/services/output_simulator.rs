/// ============================================================
///  Fleet Output Simulator
///
///  Fixed degradation model for a 20 kW nameplate plant:
///   1. Operability window – a plant produces only while its age is
///                           strictly inside (60, 25 × 365) days
///   2. Efficiency decay   – linear 0.5 %/year, evaluated with the
///                           age at the start of each simulated day
///   3. Daily energy       – kW × full-sun-hours/day (1000 h/year)
///
///  Everything here is pure: identical inputs give bit-identical
///  outputs, and accumulation always runs in input order.
/// ============================================================

use crate::models::plant::{FleetSnapshot, Plant, PlantNetwork, PlantOutput};

// ─── Model constants ─────────────────────────────────────────
pub const NAMEPLATE_KW: f64 = 20.0;
pub const ANNUAL_DECAY: f64 = 0.005;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const FULL_SUN_HOURS_PER_DAY: f64 = 1000.0 / DAYS_PER_YEAR;
/// Commissioning period; a plant of exactly this age still produces nothing.
pub const COMMISSIONING_DAYS: u64 = 60;
/// Retirement age (25 years); a plant of exactly this age produces nothing.
pub const RETIREMENT_DAYS: u64 = 25 * 365;

// ─── Public output ───────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSimulation {
    pub total_energy_kwh: f64,
    pub updated_plants: Vec<PlantNetwork>,
}

#[inline]
pub fn is_productive(age: u64) -> bool {
    age > COMMISSIONING_DAYS && age < RETIREMENT_DAYS
}

/// Output in kW for a plant of the given age.
///
/// No floor is applied: past ~200 years the value turns negative. Such ages
/// never fall inside the operability window, so `simulate_one` cannot see it.
#[inline]
pub fn daily_output_kw(age: u64) -> f64 {
    NAMEPLATE_KW * (1.0 - (age as f64 / DAYS_PER_YEAR) * ANNUAL_DECAY)
}

/// Energy (kWh) produced by one plant over `days`, starting at `initial_age`.
///
/// Only the ages inside the operability window are visited, so the cost is
/// bounded by the window length whatever `days` is. Days outside it add
/// nothing, and the in-window days are summed in the same order.
pub fn simulate_one(initial_age: u64, days: u64) -> f64 {
    let first = initial_age.max(COMMISSIONING_DAYS + 1);
    let end = initial_age.saturating_add(days).min(RETIREMENT_DAYS);

    let mut total = 0.0;
    for current_age in first..end {
        if is_productive(current_age) {
            total += daily_output_kw(current_age) * FULL_SUN_HOURS_PER_DAY;
        }
    }
    total
}

/// Simulates every plant forward by `days`.
/// The updated list keeps the input order.
pub fn simulate_fleet(plants: &[Plant], days: u64) -> FleetSimulation {
    let mut total_energy_kwh = 0.0;
    let updated_plants = plants
        .iter()
        .map(|plant| {
            total_energy_kwh += simulate_one(plant.age, days);
            PlantNetwork {
                name: plant.name.clone(),
                age: plant.age + days,
            }
        })
        .collect();

    FleetSimulation {
        total_energy_kwh,
        updated_plants,
    }
}

/// Aggregate energy only; same accumulation order as `simulate_fleet`.
pub fn total_output(plants: &[Plant], days: u64) -> f64 {
    plants
        .iter()
        .fold(0.0, |acc, plant| acc + simulate_one(plant.age, days))
}

/// Per-plant network state for a stored fleet, in snapshot order.
pub fn simulate_against_store(snapshot: &FleetSnapshot, days: u64) -> Vec<PlantOutput> {
    snapshot
        .plants
        .iter()
        .map(|plant| PlantOutput {
            name: plant.name.clone(),
            age: plant.age + days,
            output_in_kwh: simulate_one(plant.age, days),
        })
        .collect()
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Core records ────────────────────────────────────────────────────────────

/// A solar plant at its last known observation point.
/// `age` is expressed in days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Plant {
    pub name: String,
    pub age: u64,
}

impl Plant {
    pub fn new(name: impl Into<String>, age: u64) -> Self {
        Self { name: name.into(), age }
    }
}

/// The complete set of plants currently known to the store.
/// Replaced wholesale on every load; plant order is the load order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub id: Uuid,
    pub loaded_at: DateTime<Utc>,
    pub plants: Vec<Plant>,
}

impl FleetSnapshot {
    pub fn new(plants: Vec<Plant>) -> Self {
        Self {
            id: Uuid::new_v4(),
            loaded_at: Utc::now(),
            plants,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

// ─── Request payloads ────────────────────────────────────────────────────────

/// Incoming `{name, age}` record. Unknown fields are ignored.
/// `age` is signed on the wire so negative values can be rejected with a
/// proper message instead of a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlantRequest {
    pub name: String,
    pub age: i64,
}

#[cfg(test)]
impl PlantRequest {
    pub fn new(name: impl Into<String>, age: i64) -> Self {
        Self { name: name.into(), age }
    }
}

/// Multipart body of the upload endpoint (documentation only on the wire).
#[derive(Debug, Default, ToSchema)]
pub struct UploadForm {
    /// JSON array of `{name, age}` records
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// Simulated period in days (alternative to the `days` query parameter)
    pub days: Option<i64>,
}

// ─── REST API response types ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlantNetwork {
    pub name: String,
    pub age: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[serde(rename = "producedKWh")]
    pub produced_kwh: f64,
    pub network: Vec<PlantNetwork>,
}

/// Per-plant network state after the simulated period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlantOutput {
    pub name: String,
    pub age: u64,
    #[serde(rename = "outputInKWh")]
    pub output_in_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TotalOutputResponse {
    #[serde(rename = "total-output-in-kwh")]
    pub total_output_in_kwh: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub plants_total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

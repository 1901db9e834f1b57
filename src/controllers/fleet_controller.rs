use axum::{
    extract::{rejection::JsonRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ServiceError, ServiceResult};
use crate::models::plant::{
    ErrorResponse, HealthStatus, PlantOutput, PlantRequest, TotalOutputResponse, UploadForm,
    UploadResponse,
};
use crate::shared_state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DaysQuery {
    /// Simulated period in days
    pub days: Option<i64>,
}

/// POST /solar-simulator/upload
/// Simulate an uploaded fleet
///
/// Reads a JSON array of `{name, age}` records from the `file` form field and
/// returns the energy produced over `days` together with the aged fleet.
/// The stored fleet is not touched.
#[utoipa::path(
    post,
    path = "/solar-simulator/upload",
    params(DaysQuery),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Energy produced and updated fleet", body = UploadResponse),
        (status = 400, description = "Empty or unreadable file, or invalid days", body = ErrorResponse)
    )
)]
pub async fn upload_plants(
    State(state): State<AppState>,
    Query(query): Query<DaysQuery>,
    multipart: Multipart,
) -> ServiceResult<Json<UploadResponse>> {
    let form = read_upload_form(multipart).await?;
    let days = query
        .days
        .or(form.days)
        .ok_or_else(|| ServiceError::invalid("missing 'days' parameter"))?;

    if form.file.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::invalid("uploaded file is empty"));
    }
    let plants: Vec<PlantRequest> = serde_json::from_slice(&form.file)
        .map_err(|e| ServiceError::invalid(format!("unreadable plant list: {e}")))?;

    let response = state.fleet.calculate_energy_production(&plants, days)?;
    Ok(Json(response))
}

async fn read_upload_form(mut multipart: Multipart) -> ServiceResult<UploadForm> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::invalid(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ServiceError::invalid(format!("failed to read file: {e}")))?;
                form.file = bytes.to_vec();
            }
            Some("days") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ServiceError::invalid(format!("failed to read days: {e}")))?;
                form.days = Some(parse_days(&text)?);
            }
            _ => {}
        }
    }
    Ok(form)
}

/// POST /solar-simulator/load
/// Replace the stored fleet
///
/// Clears the previously loaded fleet and stores the given plants in order.
#[utoipa::path(
    post,
    path = "/solar-simulator/load",
    request_body = Vec<PlantRequest>,
    responses(
        (status = 205, description = "Fleet replaced"),
        (status = 400, description = "Invalid plant records", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn load_network(
    State(state): State<AppState>,
    body: Result<Json<Vec<PlantRequest>>, JsonRejection>,
) -> ServiceResult<StatusCode> {
    let Json(plants) = body
        .map_err(|e| ServiceError::invalid(format!("unreadable plant list: {}", e.body_text())))?;
    state.fleet.load_network(&plants)?;
    Ok(StatusCode::RESET_CONTENT)
}

/// GET /solar-simulator/output/T:{days}
/// Total output of the stored fleet
#[utoipa::path(
    get,
    path = "/solar-simulator/output/T:{days}",
    params(
        ("days" = String, Path, description = "Simulated period in days, `T:` prefix optional")
    ),
    responses(
        (status = 200, description = "Total energy in kWh", body = TotalOutputResponse),
        (status = 400, description = "Invalid days", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_total_output(
    Path(days): Path<String>,
    State(state): State<AppState>,
) -> ServiceResult<Json<TotalOutputResponse>> {
    let days = parse_days(&days)?;
    let total = state.fleet.total_output(days)?;
    Ok(Json(TotalOutputResponse { total_output_in_kwh: total }))
}

/// GET /solar-simulator/network/T:{days}
/// Network state of the stored fleet
///
/// Returns every stored plant, in load order, with its age and output after
/// the simulated period.
#[utoipa::path(
    get,
    path = "/solar-simulator/network/T:{days}",
    params(
        ("days" = String, Path, description = "Simulated period in days, `T:` prefix optional")
    ),
    responses(
        (status = 200, description = "Per-plant state", body = Vec<PlantOutput>),
        (status = 400, description = "Invalid days", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_network_state(
    Path(days): Path<String>,
    State(state): State<AppState>,
) -> ServiceResult<Json<Vec<PlantOutput>>> {
    let days = parse_days(&days)?;
    let outputs = state.fleet.network_state(days)?;
    Ok(Json(outputs))
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> ServiceResult<Json<HealthStatus>> {
    Ok(Json(HealthStatus {
        status: "UP".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        plants_total: state.fleet.fleet_size()?,
    }))
}

/// Accepts `7` or `T:7`.
pub fn parse_days(raw: &str) -> ServiceResult<i64> {
    let raw = raw.trim();
    let digits = raw.strip_prefix("T:").unwrap_or(raw);
    digits
        .parse::<i64>()
        .map_err(|_| ServiceError::invalid(format!("days must be an integer, got '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_days() {
        assert_eq!(parse_days("T:7").unwrap(), 7);
        assert_eq!(parse_days("12").unwrap(), 12);
        assert_eq!(parse_days(" 3 ").unwrap(), 3);
        assert_eq!(parse_days("T:-2").unwrap(), -2);
        assert!(parse_days("T:").is_err());
        assert!(parse_days("seven").is_err());
    }
}

use utoipa::OpenApi;
use crate::controllers::fleet_controller;
use crate::models::plant;

#[derive(OpenApi)]
#[openapi(
    paths(
        fleet_controller::upload_plants,
        fleet_controller::load_network,
        fleet_controller::get_total_output,
        fleet_controller::get_network_state,
        fleet_controller::health
    ),
    components(
        schemas(
            plant::PlantRequest,
            plant::PlantNetwork,
            plant::PlantOutput,
            plant::UploadForm,
            plant::UploadResponse,
            plant::TotalOutputResponse,
            plant::HealthStatus,
            plant::ErrorResponse
        )
    ),
    tags(
        (name = "solar-fleet-sim", description = "Solar Fleet Output Simulation API")
    )
)]
pub struct ApiDoc;

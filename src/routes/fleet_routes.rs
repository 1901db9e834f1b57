use axum::{
    response::Html,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use crate::api_docs::ApiDoc;
use crate::controllers::fleet_controller::{
    get_network_state, get_total_output, health, load_network, upload_plants,
};
use crate::shared_state::AppState;

/// Build the `/solar-simulator/*` sub-router.
/// The `T:` in `T:{days}` is part of the captured segment and stripped by
/// the handlers, so `/output/7` works as well.
pub fn fleet_routes() -> Router<AppState> {
    Router::new()
        .route("/upload",          post(upload_plants))
        .route("/load",            post(load_network))
        .route("/output/{days}",   get(get_total_output))
        .route("/network/{days}",  get(get_network_state))
}

/// Full application router: simulator API, health, OpenAPI docs.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .nest("/solar-simulator", fleet_routes())
        .route("/health", get(health))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use axum::http::{header, HeaderValue};
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api::handlers::{self as api_handlers, AppState};

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let max_body_size = state.settings.server.max_request_body_size;

    let api_routes = Router::new()
        .route("/process-data", post(api_handlers::process_data))
        .with_state(state.clone());

    // Health check routes (no state needed for health, state needed for ready)
    let health_routes = Router::new()
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        .layer(
            // Request body size limit - prevent memory exhaustion from large payloads
            RequestBodyLimitLayer::new(max_body_size),
        )
        .layer(cors_layer())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Allow every origin, method and header with credentials.
/// Wildcards cannot be combined with credentials, so each is mirrored
/// back from the request instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

//! Axum router — maps all URL paths to handlers.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use markbook_config::CorsConfig;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers::{
    calculate::calculate_grades,
    export::export_grades,
    scale::get_default_scale,
    session::{delete_session, get_session},
    system::{health_check, root},
    upload::upload_gradebook,
};
use crate::state::SharedState;

/// Gradebook uploads are small; cap the body well above any real export.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build and return the full axum router.
pub fn build_router(state: SharedState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/upload", post(upload_gradebook))
        .route(
            "/api/session/{session_id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/grading-scale/default", get(get_default_scale))
        .route("/api/calculate", post(calculate_grades))
        .route("/api/export", post(export_grades))
        // Middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors_layer(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS limited to the configured frontend origins.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

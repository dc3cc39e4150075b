use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{error, warn};

use crate::config::settings::CorsConfig;
use crate::handlers;
use crate::state::AppState;
use crate::utils::error::ErrorResponse;

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.settings.cors);

    // Public routes (no session)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout));

    // Session routes, gated by the `Authenticated` extractor
    let resource_routes =
        Router::new().route("/{category}", post(handlers::resource::fetch_resource));

    Router::new()
        .merge(public_routes)
        .merge(resource_routes)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        // CORS
        .layer(cors)
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Credentialed CORS: wildcards are not allowed alongside credentials, so
/// methods and headers are mirrored from the preflight instead.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal())).into_response()
}

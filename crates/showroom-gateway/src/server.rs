// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    middleware as axum_middleware,
    routing::{MethodRouter, get, post},
};
use showroom_analysis::AnalysisService;
use showroom_core::ShowroomError;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Path the analysis function has always been served from.
pub const ANALYSIS_PATH: &str = "/functions/v1/ai-visit-analysis";
/// Versioned alias of [`ANALYSIS_PATH`].
pub const ANALYSIS_ALIAS_PATH: &str = "/v1/visits/analyze";

/// State for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    pub start_time: Instant,
    pub service_name: String,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<AnalysisService>,
    pub auth: AuthConfig,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(service: Arc<AnalysisService>, auth: AuthConfig, service_name: String) -> Self {
        Self {
            service,
            auth,
            health: HealthState {
                start_time: Instant::now(),
                service_name,
            },
        }
    }
}

/// Bind address and auth settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

fn analysis_route() -> MethodRouter<GatewayState> {
    post(handlers::post_analysis)
        .options(handlers::options_ok)
        .fallback(handlers::method_not_allowed)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}

/// Builds the full router with CORS and request tracing.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(ANALYSIS_PATH, analysis_route())
        .route(ANALYSIS_ALIAS_PATH, analysis_route())
        .route("/v1/visits/{visit_id}/analysis", get(handlers::get_visit_analysis))
        .route("/v1/visits/{visit_id}/analysis-log", get(handlers::get_analysis_log))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Serves the gateway until `shutdown` resolves.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ShowroomError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ShowroomError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ShowroomError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

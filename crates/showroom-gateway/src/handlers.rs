// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use showroom_core::{AnalysisLogEntry, ShowroomError, VisitAnalysisRequest};
use showroom_resilience::{BreakerSnapshot, BreakerState};
use tracing::{error, warn};

use crate::server::GatewayState;

/// Body of a 4xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of a 500 response.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" while the circuit breaker is open.
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_secs: u64,
    pub circuit_breaker: BreakerSnapshot,
}

/// Body of `GET /v1/visits/{visit_id}/analysis-log`.
#[derive(Debug, Serialize)]
pub struct AnalysisLogResponse {
    pub visit_id: String,
    pub entries: Vec<AnalysisLogEntry>,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error(err: &ShowroomError) -> Response {
    error!(error = %err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse {
            success: false,
            error: "Internal server error".to_string(),
            message: "Failed to analyze visit".to_string(),
        }),
    )
        .into_response()
}

/// POST /functions/v1/ai-visit-analysis
pub async fn post_analysis(
    State(state): State<GatewayState>,
    payload: Result<Json<VisitAnalysisRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed analysis request");
            return bad_request(rejection.body_text());
        }
    };

    match state.service.analyze(&request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome.into_response())).into_response(),
        Err(ShowroomError::Validation(message)) => bad_request(message),
        Err(e) => internal_error(&e),
    }
}

/// Empty 200 for `OPTIONS` requests that are not CORS pre-flights.
pub async fn options_ok() -> StatusCode {
    StatusCode::OK
}

/// Any other method on an analysis route.
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse {
            error: "Method not allowed".to_string(),
        }),
    )
        .into_response()
}

/// GET /v1/visits/{visit_id}/analysis
pub async fn get_visit_analysis(
    State(state): State<GatewayState>,
    Path(visit_id): Path<String>,
) -> Response {
    match state.service.visits().get_analysis(&visit_id).await {
        Ok(Some(result)) => Json(result).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("no analysis for visit {visit_id}"),
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e),
    }
}

/// GET /v1/visits/{visit_id}/analysis-log
pub async fn get_analysis_log(
    State(state): State<GatewayState>,
    Path(visit_id): Path<String>,
) -> Response {
    match state.service.log().list_for_visit(&visit_id).await {
        Ok(entries) => Json(AnalysisLogResponse { visit_id, entries }).into_response(),
        Err(e) => internal_error(&e),
    }
}

/// GET /health
pub async fn get_public_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let snapshot = state.service.breaker().snapshot();
    let status = match snapshot.state {
        BreakerState::Closed => "ok",
        BreakerState::Open => "degraded",
    };
    Json(HealthResponse {
        status: status.to_string(),
        service: state.health.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        circuit_breaker: snapshot,
    })
}

// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Showroom visit-analysis service.
//!
//! Routes:
//! - `POST /functions/v1/ai-visit-analysis` (also `/v1/visits/analyze`)
//! - `GET /v1/visits/{visit_id}/analysis`
//! - `GET /v1/visits/{visit_id}/analysis-log`
//! - `GET /health` (never authenticated)

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{GatewayState, HealthState, ServerConfig, build_router, start_server};

// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `showroom serve` command implementation.
//!
//! Opens SQLite storage, builds the OpenAI provider and the process-wide
//! circuit breaker, and runs the HTTP gateway until Ctrl-C.

use std::sync::Arc;

use showroom_analysis::{AnalysisService, settings};
use showroom_config::model::ShowroomConfig;
use showroom_core::{ShowroomError, StorageAdapter};
use showroom_gateway::{AuthConfig, GatewayState, ServerConfig};
use showroom_openai::OpenAiProvider;
use showroom_resilience::CircuitBreaker;
use showroom_scoring::ModelScorer;
use showroom_storage::SqliteStorage;
use tracing::{info, warn};

/// Opens and migrates the configured database.
pub(crate) async fn open_storage(config: &ShowroomConfig) -> Result<Arc<SqliteStorage>, ShowroomError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    Ok(Arc::new(storage))
}

/// Wires the analysis service over `storage`. `offline` skips the model.
pub(crate) fn build_service(
    config: &ShowroomConfig,
    storage: Arc<SqliteStorage>,
    offline: bool,
) -> Result<AnalysisService, ShowroomError> {
    let breaker = Arc::new(CircuitBreaker::new(settings::breaker_config(&config.analysis)));

    let service = if offline {
        AnalysisService::offline(breaker, storage.clone(), storage)
    } else {
        let provider = Arc::new(OpenAiProvider::new(config)?);
        let scorer = ModelScorer::new(provider, settings::model_settings(&config.openai));
        AnalysisService::new(scorer, breaker, storage.clone(), storage)
    };

    Ok(service.with_cache_ttl(settings::cache_ttl(&config.analysis)))
}

/// Runs the `showroom serve` command.
pub async fn run_serve(config: ShowroomConfig) -> Result<(), ShowroomError> {
    init_tracing(&config.service.log_level);

    info!(name = %config.service.name, "starting showroom serve");

    let storage = open_storage(&config).await?;
    let service = Arc::new(build_service(&config, storage.clone(), false)?);

    if config.gateway.bearer_token.is_none() {
        warn!("no gateway bearer token configured; analysis routes are unauthenticated");
    }

    let state = GatewayState::new(
        service,
        AuthConfig {
            bearer_token: config.gateway.bearer_token.clone(),
        },
        config.service.name.clone(),
    );
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    let served = showroom_gateway::start_server(&server_config, state, shutdown_signal()).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "storage close failed");
    }
    served?;

    info!("showroom serve shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => warn!(error = %e, "failed to listen for shutdown signal"),
    }
}

/// Initializes the tracing subscriber with the given log level.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("showroom={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

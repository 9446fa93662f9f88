//! Elysian console backend composition root.

#![forbid(unsafe_code)]

mod console_config;
mod console_router;
mod dto;
mod error;
mod handlers;
mod session_registry;
mod state;

use std::sync::Arc;

use elysian_core::AppError;
use elysian_infrastructure::{HttpElysianAdminClient, InMemoryElysianStore};
use tracing::info;

use crate::console_config::{ConsoleConfig, DataSource, init_tracing};
use crate::console_router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConsoleConfig::load()?;

    let app_state = match &config.data_source {
        DataSource::Http {
            api_url,
            credentials,
            timeout,
        } => {
            let http_client = reqwest::Client::builder()
                .timeout(*timeout)
                .build()
                .map_err(|error| {
                    AppError::Internal(format!("failed to build http client: {error}"))
                })?;
            info!(api_url = %api_url, "using ElysianDB admin API");
            AppState::from_store(Arc::new(HttpElysianAdminClient::new(
                http_client,
                api_url.clone(),
                credentials.clone(),
            )))
        }
        DataSource::Memory => {
            info!("using seeded in-memory store");
            AppState::from_store(Arc::new(InMemoryElysianStore::seeded().await?))
        }
    };

    let app = build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "elysian-console listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("console server error: {error}")))
}

//! vitalview
//!
//! A small web application that serves patient vital-sign reports from a
//! CSV dataset, exports them as PDF through an external rendering engine
//! and, when an API key is configured, produces an AI-assisted diagnosis
//! report by chaining two streaming text-generation calls.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vitalview::api::server;
use vitalview::api::types::ApiContext;
use vitalview::config::{AppConfig, APP_NAME, APP_VERSION};
use vitalview::diagnosis::ChatClient;
use vitalview::export::PdfEngine;
use vitalview::store::RecordStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vitalview=info".parse()?))
        .init();

    tracing::info!("{APP_NAME} v{APP_VERSION} starting");

    // Configuration and dataset problems are fatal before the bind.
    let config = AppConfig::from_env()?;

    tracing::info!(path = %config.dataset_path.display(), "loading dataset");
    let store = RecordStore::load(&config.dataset_path)?;

    let generator = match config.diagnosis.as_ref() {
        Some(diagnosis) => {
            tracing::info!(model = %diagnosis.model, "diagnosis service configured");
            Some(Arc::new(ChatClient::new(diagnosis)))
        }
        None => {
            tracing::info!("diagnosis service not configured; AI report endpoint disabled");
            None
        }
    };

    let ctx = ApiContext::new(
        Arc::new(store),
        PdfEngine::new(config.pdf_engine.clone()),
        generator,
    );

    let mut api = server::start(ctx, config.bind_addr).await?;
    tracing::info!(addr = %api.addr, "vitalview listening");

    tokio::signal::ctrl_c().await?;
    api.shutdown();

    Ok(())
}

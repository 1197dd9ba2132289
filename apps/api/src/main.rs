mod config;
mod council;
mod documents;
mod errors;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::council::catalog::Catalog;
use crate::llm_client::{CompletionClient, GroqClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Unleash API v{}", env!("CARGO_PKG_VERSION"));

    // Reference data: built in, or overridden from a JSON file
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };
    info!(
        "Catalog ready: {} sectors, {} personas, {} questions",
        catalog.sectors.len(),
        catalog.personas.len(),
        catalog.questions.len()
    );

    // Initialize LLM client (absent credential is reported per review, not here)
    let llm: Option<Arc<dyn CompletionClient>> = match &config.groq_api_key {
        Some(key) => {
            let client: Arc<dyn CompletionClient> =
                Arc::new(GroqClient::new(key.clone(), config.groq_api_url.clone()));
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            warn!("GROQ_API_KEY is not set; reviews will be refused until it is configured");
            None
        }
    };

    let state = AppState {
        llm,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::sync::Arc;

use crate::config::Config;
use crate::council::catalog::Catalog;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no model credential was configured; reviews are refused.
    pub llm: Option<Arc<dyn CompletionClient>>,
    pub catalog: Arc<Catalog>,
    pub config: Config,
}

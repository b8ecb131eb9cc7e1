use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ExtractorRegistry;
use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Hosted model behind the text-in/text-out seam. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    /// Readers for the formats enabled by `ACCEPTED_FORMATS`.
    pub extractors: Arc<ExtractorRegistry>,
    pub sessions: SessionStore,
    pub config: Config,
}

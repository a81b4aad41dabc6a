use std::sync::Arc;

use crate::config::Config;
use crate::generation::scraper::SiteKeywordSource;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main` and cloned per request; nothing in it is mutable.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable competitor keyword lookup. Default: LlmSiteKeywordSource.
    pub keyword_source: Arc<dyn SiteKeywordSource>,
}

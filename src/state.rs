use std::sync::Arc;

use crate::fetch::CoverFetcher;

/// Shared application state passed to all handlers.
/// The fetcher is built once at startup so its HTTP client connection pool
/// is reused across requests.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn CoverFetcher>,
}

use std::sync::Arc;

use tokio::sync::Mutex;
use vck_core::CommitSearch;

use crate::auth::SlackVerifier;
use crate::config::ServerConfig;
use crate::notify::ResponseSink;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub searcher: Arc<dyn CommitSearch>,
    pub verifier: Arc<SlackVerifier>,
    pub sink: Arc<dyn ResponseSink>,
    /// Searches run one at a time; the clone is not safe to fetch into
    /// concurrently.
    pub search_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        searcher: Arc<dyn CommitSearch>,
        verifier: SlackVerifier,
        sink: Arc<dyn ResponseSink>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            searcher,
            verifier: Arc::new(verifier),
            sink,
            search_lock: Arc::new(Mutex::new(())),
        }
    }
}

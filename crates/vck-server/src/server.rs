use tokio::net::TcpListener;

use crate::error::ServerResult;
use crate::router::build_router;
use crate::state::AppState;

/// The Slack slash-command server.
pub struct VersionCheckServer {
    state: AppState,
}

impl VersionCheckServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let bind_addr = self.state.config.bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(bind_addr).await?;
        tracing::info!("version-check server listening on {bind_addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

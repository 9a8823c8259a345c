use rail_booking::BookingLedger;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// The booking ledger HTTP server.
pub struct RailServer {
    config: ServerConfig,
    state: AppState,
}

impl RailServer {
    /// Open the configured stores and build the ledger over them.
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let stores = config.storage.open()?;
        let state = AppState::new(BookingLedger::new(stores));
        Ok(Self { config, state })
    }

    pub fn with_state(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = build_router(self.state);
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!(
            addr = %self.config.bind_addr,
            storage = ?self.config.storage.backend,
            "rail server listening"
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

use std::sync::Arc;

use rail_booking::BookingLedger;

use crate::auth::{AuthProvider, BearerPrincipalAuth};
use crate::error::{ServerError, ServerResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<BookingLedger>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(ledger: BookingLedger) -> Self {
        Self {
            ledger: Arc::new(ledger),
            auth: Arc::new(BearerPrincipalAuth),
        }
    }

    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = auth;
        self
    }

    /// Run a ledger operation on the blocking pool. File-backed stores fsync
    /// on every write, which must not stall the async workers.
    pub async fn run<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&BookingLedger) -> rail_booking::BookingResult<T> + Send + 'static,
    {
        let ledger = Arc::clone(&self.ledger);
        tokio::task::spawn_blocking(move || op(&ledger))
            .await
            .map_err(|e| ServerError::Internal(format!("ledger task failed: {e}")))?
            .map_err(ServerError::from)
    }
}

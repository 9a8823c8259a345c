use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use rail_booking::BookingError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("store error: {0}")]
    Store(#[from] rail_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Booking(err) => match err {
                BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                BookingError::NotInitialized
                | BookingError::AlreadyInitialized
                | BookingError::Full { .. } => StatusCode::CONFLICT,
                BookingError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                BookingError::NotFound { .. } | BookingError::Empty(_) => StatusCode::NOT_FOUND,
                BookingError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            Self::Store(_) | Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Booking(err) => err.code(),
            Self::AuthFailed(_) => "auth_failed",
            _ => "internal",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }
        let message = match &self {
            // Internal details stay in the log.
            Self::Store(_) | Self::Io(_) | Self::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message, "code": self.code() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

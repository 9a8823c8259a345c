use rail_store::StoreError;
use rail_types::EntityKind;

/// Errors produced by ledger operations.
///
/// Every public operation returns these as values. Unexpected internal
/// failures (store I/O, poisoned locks) surface as [`BookingError::Failed`],
/// whose message names the operation but not the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    /// A required field is missing or blank.
    #[error("incomplete input data: {0}")]
    InvalidInput(String),

    #[error("station has not been initialized")]
    NotInitialized,

    #[error("station has already been initialized")]
    AlreadyInitialized,

    /// The caller is not the station identity.
    #[error("only the station can {action}")]
    Unauthorized { action: String },

    #[error("{kind} not found for id: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("train {train_id} is currently full, please wait or book another one")]
    Full { train_id: String },

    /// A listing query matched nothing.
    #[error("{0}")]
    Empty(String),

    /// Unexpected internal failure, converted at the operation boundary.
    #[error("failed to {operation}")]
    Failed { operation: String, reason: String },
}

impl BookingError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    pub fn failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotInitialized => "not_initialized",
            Self::AlreadyInitialized => "already_initialized",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotFound { .. } => "not_found",
            Self::Full { .. } => "full",
            Self::Empty(_) => "empty",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Adapter for `map_err`: log a store failure and convert it into the
/// generic failure for `operation`.
pub(crate) fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> BookingError {
    move |err| {
        tracing::error!(operation, error = %err, "store failure");
        BookingError::failed(operation, err.to_string())
    }
}

/// Result alias for ledger operations.
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            BookingError::NotInitialized.to_string(),
            "station has not been initialized"
        );
        assert_eq!(
            BookingError::unauthorized("add a train").to_string(),
            "only the station can add a train"
        );
        assert_eq!(
            BookingError::not_found(EntityKind::Train, "t1").to_string(),
            "train not found for id: t1"
        );
    }

    #[test]
    fn failed_hides_the_cause() {
        let err = BookingError::failed("add train", "I/O error: disk full");
        assert_eq!(err.to_string(), "failed to add train");
        assert_eq!(err.code(), "failed");
    }

    #[test]
    fn store_failure_converts() {
        let err = store_failure("issue ticket")(StoreError::LockPoisoned);
        assert!(matches!(
            err,
            BookingError::Failed { ref operation, .. } if operation == "issue ticket"
        ));
    }
}

//! Error types for order-desk.

use thiserror::Error;

use crate::backend::BackendError;

/// Main error type for order-desk operations.
///
/// Business outcomes (missing identifiers, unknown orders, policy
/// rejections) are not errors; they are reported as dialogue outcomes.
/// Everything here ends a turn with the escalation reply.
#[derive(Error, Debug)]
pub enum OrderDeskError {
    /// The backend data store failed or timed out.
    #[error("backend unavailable: {0}")]
    Backend(#[from] BackendError),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid runtime configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl OrderDeskError {
    /// Whether the error originates from the backend gateway.
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// Convenience Result type for order-desk operations.
pub type Result<T> = std::result::Result<T, OrderDeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_conversion() {
        let err: OrderDeskError = BackendError::Unavailable("connection refused".into()).into();
        assert!(err.is_backend());
        assert!(err.to_string().contains("backend unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: OrderDeskError = io_err.into();
        assert!(matches!(err, OrderDeskError::Io(_)));
        assert!(!err.is_backend());
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_lock_poisoned_display() {
        assert_eq!(
            OrderDeskError::LockPoisoned.to_string(),
            "internal lock poisoned"
        );
    }

    #[test]
    fn test_invalid_config_display() {
        let err = OrderDeskError::InvalidConfig("timeout must be positive".into());
        assert!(err.to_string().contains("timeout must be positive"));
    }
}

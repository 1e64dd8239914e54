//! # Tracking Error Types
//!
//! Structured error handling for the status broadcast core using thiserror
//! instead of `Box<dyn Error>` patterns.

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the subscription channel and its collaborators.
///
/// Emission to a connection that has gone away is deliberately absent here:
/// delivery is fire-and-forget and a dead destination is a no-op, not a
/// failure.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Invalid order id: {reason}")]
    InvalidOrderId { reason: String },

    #[error("Order not found or not visible to requester: {order_id}")]
    UnknownOrder { order_id: String },

    #[error("Order {order_id} is already being tracked on this connection")]
    DuplicateSubscription { order_id: String },

    #[error("Connection is not registered: {connection_id}")]
    ConnectionNotRegistered { connection_id: Uuid },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Order store error: {message}")]
    Store { message: String },
}

pub type Result<T> = std::result::Result<T, TrackingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackingError::InvalidOrderId {
            reason: "order id must be a non-empty token".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid order id: order id must be a non-empty token"
        );

        let err = TrackingError::DuplicateSubscription {
            order_id: "12345".to_string(),
        };
        assert!(err.to_string().contains("12345"));
    }
}

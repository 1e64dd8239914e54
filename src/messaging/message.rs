//! # Wire Messages for the Tracking Channel
//!
//! Defines the message formats exchanged over the real-time connection.
//! Payload shapes match the browser client exactly: `trackOrder` carries a
//! bare order id (string or number), `orderStatus` carries
//! `{"orderId": ..., "status": ...}`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{Result, TrackingError};
use crate::state_machine::OrderStatus;

/// Opaque order identifier as received on the wire.
///
/// Clients send either a JSON string or a number; both normalize to the same
/// token. The core never interprets the token beyond requiring it to be
/// non-empty; correlation to a persisted order belongs to the order store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order id from a raw token, rejecting empty/whitespace tokens.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TrackingError::InvalidOrderId {
                reason: "order id must be a non-empty token".to_string(),
            });
        }
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawOrderId {
            Text(String),
            Numeric(serde_json::Number),
        }

        let token = match RawOrderId::deserialize(deserializer)? {
            RawOrderId::Text(s) => s,
            RawOrderId::Numeric(n) => n.to_string(),
        };
        OrderId::new(token).map_err(|e| D::Error::custom(e.to_string()))
    }
}

/// Status payload delivered to the subscribed connection on every transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub order_id: OrderId,
    pub status: OrderStatus,
}

/// Messages a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Begin (or re-issue after reconnect) tracking of an order
    TrackOrder(OrderId),
}

/// Messages the server delivers to one subscribed client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    OrderStatus(StatusUpdate),
}

impl ServerMessage {
    /// Build an `orderStatus` event for one session transition.
    pub fn order_status(order_id: OrderId, status: OrderStatus) -> Self {
        Self::OrderStatus(StatusUpdate { order_id, status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::events;

    #[test]
    fn test_order_id_rejects_empty_tokens() {
        assert!(OrderId::new("12345").is_ok());
        assert!(OrderId::new("").is_err());
        assert!(OrderId::new("   ").is_err());
    }

    #[test]
    fn test_order_id_accepts_string_or_number() {
        let from_string: OrderId = serde_json::from_str("\"12345\"").unwrap();
        let from_number: OrderId = serde_json::from_str("12345").unwrap();
        assert_eq!(from_string, from_number);
        assert_eq!(from_number.as_str(), "12345");

        let empty: std::result::Result<OrderId, _> = serde_json::from_str("\"\"");
        assert!(empty.is_err());
    }

    #[test]
    fn test_status_update_wire_shape() {
        let update = StatusUpdate {
            order_id: OrderId::new("12345").unwrap(),
            status: OrderStatus::OnTheWay,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"orderId": "12345", "status": "On the Way"})
        );
    }

    #[test]
    fn test_track_order_round_trip() {
        let raw = serde_json::json!({"event": "trackOrder", "data": 98765});
        let message: ClientMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(
            message,
            ClientMessage::TrackOrder(OrderId::new("98765").unwrap())
        );
    }

    #[test]
    fn test_event_names_match_constants() {
        let track = serde_json::to_value(ClientMessage::TrackOrder(
            OrderId::new("1").unwrap(),
        ))
        .unwrap();
        assert_eq!(track["event"], events::TRACK_ORDER);

        let status = serde_json::to_value(ServerMessage::order_status(
            OrderId::new("1").unwrap(),
            OrderStatus::Preparing,
        ))
        .unwrap();
        assert_eq!(status["event"], events::ORDER_STATUS);
        assert_eq!(status["data"]["status"], "Preparing");
    }
}

//! Shared helpers for integration tests.
//!
//! All timing tests run on tokio's paused clock: `settle` yields so spawned
//! driver tasks get scheduled without time moving, and `tokio::time::advance`
//! moves the clock deterministically.

#![allow(dead_code)]

use ordertrack_core::{OrderId, OrderStatus, ServerMessage, StatusUpdate};
use tokio::sync::mpsc::UnboundedReceiver;

/// Let spawned driver tasks run without advancing the paused clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Pull every event currently queued on a connection's receiver.
pub fn drain(rx: &mut UnboundedReceiver<ServerMessage>) -> Vec<StatusUpdate> {
    let mut updates = Vec::new();
    while let Ok(ServerMessage::OrderStatus(update)) = rx.try_recv() {
        updates.push(update);
    }
    updates
}

/// Expected `orderStatus` payload for comparisons.
pub fn update(order_id: &str, status: OrderStatus) -> StatusUpdate {
    StatusUpdate {
        order_id: OrderId::new(order_id).unwrap(),
        status,
    }
}

//! Per-subscription tracking state and its cancellable task guard.

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::messaging::OrderId;
use crate::state_machine::OrderStatus;

/// Identity of one real-time connection.
pub type ConnectionId = Uuid;

/// Live, in-memory tracking state for one (connection, order) subscription.
///
/// Ephemeral and process-local: a restart or connection drop discards it
/// silently, and the client re-issues `trackOrder` to start over. The state
/// index only ever moves forward and never exceeds the sequence bounds.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub session_id: Uuid,
    pub connection_id: ConnectionId,
    pub order_id: OrderId,
    pub state_index: usize,
}

impl TrackingSession {
    /// Create a fresh session at the initial status.
    pub fn new(connection_id: ConnectionId, order_id: OrderId) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            connection_id,
            order_id,
            state_index: 0,
        }
    }

    /// Status at the current index.
    pub fn current_status(&self) -> Option<OrderStatus> {
        OrderStatus::from_index(self.state_index)
    }

    /// Move to the next status, if one exists. The index stays put at the
    /// terminal status, keeping it bounded by the sequence length.
    pub fn advance(&mut self) -> Option<OrderStatus> {
        let next = OrderStatus::from_index(self.state_index + 1)?;
        self.state_index += 1;
        Some(next)
    }
}

/// Owns the spawned driver task for one session.
///
/// Aborting the stored handle is the single cancellation point; the guard is
/// held by the channel's session registry and dropped when the session ends
/// or its connection goes away.
#[derive(Debug)]
pub struct SessionGuard {
    pub session_id: Uuid,
    pub order_id: OrderId,
    handle: JoinHandle<()>,
}

impl SessionGuard {
    pub fn new(session_id: Uuid, order_id: OrderId, handle: JoinHandle<()>) -> Self {
        Self {
            session_id,
            order_id,
            handle,
        }
    }

    /// Cancel the driver task. Safe to call more than once.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the driver task has run to completion or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

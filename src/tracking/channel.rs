//! # Subscription Channel
//!
//! Maps real-time connections to their tracking sessions. Demultiplexes
//! inbound `trackOrder` requests into driver sessions and routes each
//! session's emissions back to exactly the connection that asked - never
//! broadcast.
//!
//! The channel owns the explicit session registry: connection identity to
//! the set of live session guards, mutated only by track requests,
//! disconnects, and session self-completion. The channel itself is a cheap
//! clone over shared state, so the driver tasks it spawns can hold their
//! own handle back to it.

use dashmap::DashMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use super::driver::StatusDriver;
use super::session::{ConnectionId, SessionGuard, TrackingSession};
use crate::config::{DuplicatePolicy, TrackingConfig};
use crate::error::{Result, TrackingError};
use crate::logging::log_tracking_operation;
use crate::messaging::{ClientMessage, OrderId, ServerMessage};
use crate::orders::OrderStore;

/// Delivery half of one registered connection.
///
/// Emission is an unbounded, non-blocking send: no acknowledgement, no
/// retry, no backpressure. A closed receiver is treated the same as a dead
/// connection.
struct ConnectionHandle {
    principal: Option<String>,
    sender: mpsc::UnboundedSender<ServerMessage>,
}

/// Counters for observability and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub connections_registered: u64,
    pub sessions_started: u64,
    pub sessions_cancelled: u64,
    pub events_delivered: u64,
    pub events_dropped: u64,
}

struct ChannelInner {
    config: TrackingConfig,
    connections: DashMap<ConnectionId, ConnectionHandle>,
    sessions: DashMap<ConnectionId, Vec<SessionGuard>>,
    order_store: Option<Arc<dyn OrderStore>>,
    stats: RwLock<ChannelStats>,
}

/// The subscription channel: connection registry, session registry, and the
/// emission path between them.
#[derive(Clone)]
pub struct SubscriptionChannel {
    inner: Arc<ChannelInner>,
}

impl fmt::Debug for SubscriptionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionChannel")
            .field("config", &self.inner.config)
            .field("connections", &self.inner.connections.len())
            .field("sessions", &self.inner.sessions.len())
            .field("order_store", &self.inner.order_store.is_some())
            .finish()
    }
}

impl SubscriptionChannel {
    /// Create a channel that tracks unconditionally (reference behavior).
    pub fn new(config: TrackingConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a channel backed by an order store. With
    /// `config.verify_orders` set, track requests for orders the requesting
    /// principal cannot see are rejected.
    pub fn with_order_store(config: TrackingConfig, store: Arc<dyn OrderStore>) -> Self {
        Self::build(config, Some(store))
    }

    fn build(config: TrackingConfig, order_store: Option<Arc<dyn OrderStore>>) -> Self {
        Self {
            inner: Arc::new(ChannelInner {
                config,
                connections: DashMap::new(),
                sessions: DashMap::new(),
                order_store,
                stats: RwLock::new(ChannelStats::default()),
            }),
        }
    }

    /// Register a new connection with no subscriptions.
    ///
    /// Returns the connection identity and the receiver half on which every
    /// event emitted to this connection is delivered.
    pub fn register_connection(
        &self,
        principal: Option<String>,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<ServerMessage>) {
        let connection_id = Uuid::new_v4();
        let (sender, receiver) = mpsc::unbounded_channel();
        self.inner
            .connections
            .insert(connection_id, ConnectionHandle { principal, sender });
        self.inner.stats.write().connections_registered += 1;

        log_tracking_operation(
            "register_connection",
            Some(connection_id),
            None,
            "registered",
            None,
        );
        (connection_id, receiver)
    }

    /// Handle one decoded message from a connection.
    pub async fn handle_client_message(
        &self,
        connection_id: ConnectionId,
        message: ClientMessage,
    ) -> Result<()> {
        match message {
            ClientMessage::TrackOrder(order_id) => self
                .track_order(connection_id, order_id)
                .await
                .map(|_| ()),
        }
    }

    /// Begin tracking `order_id` for `connection_id`.
    ///
    /// Emits the initial status within one scheduling tick and advances on
    /// the configured cadence until the terminal status. Returns the id of
    /// the session that was started.
    pub async fn track_order(
        &self,
        connection_id: ConnectionId,
        order_id: OrderId,
    ) -> Result<Uuid> {
        let principal = match self.inner.connections.get(&connection_id) {
            Some(conn) => conn.principal.clone(),
            None => return Err(TrackingError::ConnectionNotRegistered { connection_id }),
        };

        if self.inner.config.verify_orders {
            if let Some(store) = &self.inner.order_store {
                let found = store.find_order(&order_id, principal.as_deref()).await?;
                if found.is_none() {
                    warn!(
                        connection_id = %connection_id,
                        order_id = %order_id,
                        "Rejected track request for unknown or foreign order"
                    );
                    return Err(TrackingError::UnknownOrder {
                        order_id: order_id.to_string(),
                    });
                }
            }
        }

        let session_id = {
            let mut guards = self.inner.sessions.entry(connection_id).or_default();

            match self.inner.config.duplicate_policy {
                DuplicatePolicy::ResetExisting => {
                    // only live timer chains count as cancelled; a guard
                    // whose driver already finished is just swept out
                    let mut reset = 0u64;
                    guards.retain(|guard| {
                        if guard.order_id == order_id {
                            if !guard.is_finished() {
                                guard.cancel();
                                reset += 1;
                            }
                            false
                        } else {
                            true
                        }
                    });
                    if reset > 0 {
                        self.inner.stats.write().sessions_cancelled += reset;
                        debug!(
                            connection_id = %connection_id,
                            order_id = %order_id,
                            "Reset existing tracking session on duplicate request"
                        );
                    }
                }
                DuplicatePolicy::RejectDuplicate => {
                    if guards
                        .iter()
                        .any(|guard| guard.order_id == order_id && !guard.is_finished())
                    {
                        return Err(TrackingError::DuplicateSubscription {
                            order_id: order_id.to_string(),
                        });
                    }
                }
                DuplicatePolicy::AllowMultiple => {}
            }

            let session = TrackingSession::new(connection_id, order_id.clone());
            let session_id = session.session_id;
            let guard = StatusDriver::spawn(
                self.clone(),
                session,
                self.inner.config.advance_interval(),
            );
            guards.push(guard);
            session_id
        };
        self.inner.stats.write().sessions_started += 1;

        log_tracking_operation(
            "track_order",
            Some(connection_id),
            Some(order_id.as_str()),
            "started",
            None,
        );
        Ok(session_id)
    }

    /// Deliver `message` to one specific connection, fire-and-forget.
    ///
    /// An unknown or closed destination drops the message without error.
    pub fn emit(&self, connection_id: ConnectionId, message: ServerMessage) {
        if let Some(conn) = self.inner.connections.get(&connection_id) {
            if conn.sender.send(message).is_ok() {
                self.inner.stats.write().events_delivered += 1;
                return;
            }
        }
        self.inner.stats.write().events_dropped += 1;
        trace!(
            connection_id = %connection_id,
            "Dropped emission to unreachable connection"
        );
    }

    /// Tear down a connection: cancel every session it owns, then discard
    /// the connection handle.
    pub fn disconnect(&self, connection_id: ConnectionId) {
        let cancelled = match self.inner.sessions.remove(&connection_id) {
            Some((_, guards)) => {
                for guard in &guards {
                    guard.cancel();
                }
                guards.len()
            }
            None => 0,
        };
        self.inner.connections.remove(&connection_id);
        if cancelled > 0 {
            self.inner.stats.write().sessions_cancelled += cancelled as u64;
        }

        log_tracking_operation(
            "disconnect",
            Some(connection_id),
            None,
            "disconnected",
            Some(&format!("cancelled {cancelled} session(s)")),
        );
    }

    /// True while the connection is registered.
    pub fn is_connected(&self, connection_id: ConnectionId) -> bool {
        self.inner.connections.contains_key(&connection_id)
    }

    /// Number of live sessions owned by a connection.
    pub fn active_session_count(&self, connection_id: ConnectionId) -> usize {
        self.inner
            .sessions
            .get(&connection_id)
            .map(|guards| guards.len())
            .unwrap_or(0)
    }

    /// Number of registered connections.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.len()
    }

    /// Snapshot of the channel counters.
    pub fn stats(&self) -> ChannelStats {
        *self.inner.stats.read()
    }

    /// Remove a completed session from the registry. Called by the driver
    /// task itself after the terminal status or a dead-connection teardown;
    /// the handle is simply dropped, never aborted from inside.
    pub(crate) fn finish_session(&self, connection_id: ConnectionId, session_id: Uuid) {
        if let Some(mut guards) = self.inner.sessions.get_mut(&connection_id) {
            guards.retain(|guard| guard.session_id != session_id);
        }
        self.inner
            .sessions
            .remove_if(&connection_id, |_, guards| guards.is_empty());

        info!(
            connection_id = %connection_id,
            session_id = %session_id,
            "Tracking session ended"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_disconnect_bookkeeping() {
        let channel = SubscriptionChannel::new(TrackingConfig::default());
        let (connection_id, _rx) = channel.register_connection(None);

        assert!(channel.is_connected(connection_id));
        assert_eq!(channel.connection_count(), 1);

        channel.disconnect(connection_id);
        assert!(!channel.is_connected(connection_id));
        assert_eq!(channel.connection_count(), 0);
        assert_eq!(channel.stats().connections_registered, 1);
    }

    #[tokio::test]
    async fn test_track_requires_registered_connection() {
        let channel = SubscriptionChannel::new(TrackingConfig::default());
        let result = channel
            .track_order(Uuid::new_v4(), OrderId::new("12345").unwrap())
            .await;
        assert!(matches!(
            result,
            Err(TrackingError::ConnectionNotRegistered { .. })
        ));
    }

    #[tokio::test]
    async fn test_emit_to_unknown_connection_is_a_noop() {
        let channel = SubscriptionChannel::new(TrackingConfig::default());
        channel.emit(
            Uuid::new_v4(),
            ServerMessage::order_status(
                OrderId::new("1").unwrap(),
                crate::state_machine::OrderStatus::Preparing,
            ),
        );
        assert_eq!(channel.stats().events_dropped, 1);
        assert_eq!(channel.stats().events_delivered, 0);
    }
}

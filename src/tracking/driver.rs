//! # Status Driver
//!
//! Advances one tracking session through the status sequence on a fixed
//! cadence and emits each status to the owning connection. One driver task
//! exists per session; sessions never share mutable state, so drivers run as
//! independent, uncoordinated timer chains.

use std::time::Duration;
use tracing::debug;

use super::channel::SubscriptionChannel;
use super::session::{SessionGuard, TrackingSession};
use crate::messaging::ServerMessage;

/// Spawns and runs the advancement task for tracking sessions.
pub struct StatusDriver;

impl StatusDriver {
    /// Spawn the driver task for `session`.
    ///
    /// The task emits the initial status as soon as it is scheduled, then
    /// sleeps `interval` between advancements until the terminal status has
    /// been emitted. The returned guard owns the task handle; aborting it is
    /// the only external way to stop the chain.
    pub fn spawn(
        channel: SubscriptionChannel,
        session: TrackingSession,
        interval: Duration,
    ) -> SessionGuard {
        let session_id = session.session_id;
        let order_id = session.order_id.clone();
        let handle = tokio::spawn(Self::run(channel, session, interval));
        SessionGuard::new(session_id, order_id, handle)
    }

    async fn run(
        channel: SubscriptionChannel,
        mut session: TrackingSession,
        interval: Duration,
    ) {
        let Some(mut status) = session.current_status() else {
            return;
        };
        channel.emit(
            session.connection_id,
            ServerMessage::order_status(session.order_id.clone(), status),
        );

        while !status.is_terminal() {
            tokio::time::sleep(interval).await;

            // Connection dropped while we slept: tear down without emitting.
            if !channel.is_connected(session.connection_id) {
                debug!(
                    session_id = %session.session_id,
                    order_id = %session.order_id,
                    "Connection gone, tearing down tracking session"
                );
                break;
            }

            status = match session.advance() {
                Some(next) => next,
                None => break,
            };
            channel.emit(
                session.connection_id,
                ServerMessage::order_status(session.order_id.clone(), status),
            );
            debug!(
                session_id = %session.session_id,
                order_id = %session.order_id,
                status = %status,
                "Emitted order status"
            );
        }

        channel.finish_session(session.connection_id, session.session_id);
    }
}

#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # OrderTrack Core
//!
//! Real-time order status broadcast core for the TindiBandi food-ordering
//! platform. A server-authoritative state machine advances each tracked
//! order through a fixed status sequence (`Preparing` → `On the Way` →
//! `Delivered`) on a configurable cadence and pushes every transition to
//! exactly the connection that subscribed.
//!
//! ## Architecture
//!
//! - [`tracking::StatusDriver`] - one cancellable timer-chain task per
//!   (connection, order) subscription, driving the status sequence.
//! - [`tracking::SubscriptionChannel`] - connection registry, session
//!   registry, and the fire-and-forget emission path between driver and
//!   client.
//! - [`messaging`] - the JSON wire contract (`trackOrder` / `orderStatus`).
//! - [`orders`] - the external order-store collaborator seam, used to
//!   optionally verify track requests against persisted orders.
//!
//! HTTP routing, persistence, authentication, and client rendering are
//! external collaborators; this crate is only the notification core that
//! drives a progress indicator.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ordertrack_core::{OrderId, SubscriptionChannel, TrackingConfig};
//!
//! # async fn example() -> ordertrack_core::Result<()> {
//! let channel = SubscriptionChannel::new(TrackingConfig::default());
//!
//! // One registration per real-time connection; events for that connection
//! // arrive on the returned receiver.
//! let (connection_id, mut events) = channel.register_connection(None);
//!
//! channel.track_order(connection_id, OrderId::new("12345")?).await?;
//! while let Some(event) = events.recv().await {
//!     println!("{}", serde_json::to_string(&event).unwrap());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod orders;
pub mod state_machine;
pub mod tracking;

pub use config::{DuplicatePolicy, TrackingConfig};
pub use error::{Result, TrackingError};
pub use messaging::{ClientMessage, OrderId, ServerMessage, StatusUpdate};
pub use orders::{InMemoryOrderStore, OrderRecord, OrderStore};
pub use state_machine::OrderStatus;
pub use tracking::{
    ChannelStats, ConnectionId, SessionGuard, StatusDriver, SubscriptionChannel, TrackingSession,
};

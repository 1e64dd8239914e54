//! # Tracking Core
//!
//! The two collaborating halves of the status broadcast mechanism:
//!
//! - [`StatusDriver`] owns the per-session timer chain that walks the status
//!   sequence and emits each transition.
//! - [`SubscriptionChannel`] registers connections, turns `trackOrder`
//!   requests into driver sessions, and routes emissions back to the one
//!   connection that subscribed.

pub mod channel;
pub mod driver;
pub mod session;

pub use channel::{ChannelStats, SubscriptionChannel};
pub use driver::StatusDriver;
pub use session::{ConnectionId, SessionGuard, TrackingSession};

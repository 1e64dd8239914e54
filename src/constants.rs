//! # System Constants
//!
//! Event names and default values that define the wire contract and the
//! operational defaults of the tracking core. The event name constants match
//! the serde tags on the wire message enums; a test in `messaging` keeps them
//! from drifting apart.

// Re-export status type for convenience
pub use crate::state_machine::OrderStatus;

/// Event names on the real-time channel
pub mod events {
    /// client -> server: begin/resume tracking an order
    pub const TRACK_ORDER: &str = "trackOrder";
    /// server -> client: current status after each transition
    pub const ORDER_STATUS: &str = "orderStatus";
}

/// Default configuration values
pub mod defaults {
    /// Cadence between status advancements
    pub const ADVANCE_INTERVAL_MS: u64 = 5000;
}

//! # Messaging
//!
//! Wire-level message types for the real-time tracking channel.

pub mod message;

pub use message::{ClientMessage, OrderId, ServerMessage, StatusUpdate};

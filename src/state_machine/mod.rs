// State machine module for order status progression
//
// The tracking core drives a fixed linear sequence of statuses. The sequence
// itself lives here; the timing and emission mechanics live in the tracking
// module, which only consumes the index/next/terminal queries.

pub mod states;

pub use states::OrderStatus;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status definitions matching the wire contract of the tracking channel.
///
/// Statuses form a fixed, ordered sequence. Transitions are strictly
/// sequential: no skipping, no branching, no cycling back. The driver only
/// ever asks for the next status and whether the current one is terminal, so
/// the sequence can grow without touching the advancement mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Initial status when tracking begins
    Preparing,
    /// Order has left the kitchen
    #[serde(rename = "On the Way")]
    OnTheWay,
    /// Terminal status, no further transitions
    Delivered,
}

impl OrderStatus {
    /// The full progression, in emission order.
    pub const SEQUENCE: [OrderStatus; 3] = [Self::Preparing, Self::OnTheWay, Self::Delivered];

    /// Position of this status within the sequence.
    pub fn index(self) -> usize {
        match self {
            Self::Preparing => 0,
            Self::OnTheWay => 1,
            Self::Delivered => 2,
        }
    }

    /// Status at the given sequence position, if in bounds.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::SEQUENCE.get(index).copied()
    }

    /// The status that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Check if this is the terminal status (no further transitions allowed)
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Check if this is the initial status of a fresh session
    pub fn is_initial(self) -> bool {
        self.index() == 0
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preparing => write!(f, "Preparing"),
            Self::OnTheWay => write!(f, "On the Way"),
            Self::Delivered => write!(f, "Delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Preparing" => Ok(Self::Preparing),
            "On the Way" => Ok(Self::OnTheWay),
            "Delivered" => Ok(Self::Delivered),
            _ => Err(format!("Invalid order status: {s}")),
        }
    }
}

/// Default status for new tracking sessions
impl Default for OrderStatus {
    fn default() -> Self {
        Self::Preparing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_check() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(!OrderStatus::OnTheWay.is_terminal());
    }

    #[test]
    fn test_initial_check() {
        assert!(OrderStatus::Preparing.is_initial());
        assert!(!OrderStatus::OnTheWay.is_initial());
        assert_eq!(OrderStatus::default(), OrderStatus::Preparing);
    }

    #[test]
    fn test_sequence_walk() {
        let mut status = OrderStatus::default();
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            seen.push(next);
            status = next;
        }
        assert_eq!(seen, OrderStatus::SEQUENCE);
        assert!(status.is_terminal());
    }

    #[test]
    fn test_index_round_trip() {
        for (i, status) in OrderStatus::SEQUENCE.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(OrderStatus::from_index(i), Some(*status));
        }
        assert_eq!(OrderStatus::from_index(OrderStatus::SEQUENCE.len()), None);
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(OrderStatus::OnTheWay.to_string(), "On the Way");
        assert_eq!(
            "On the Way".parse::<OrderStatus>().unwrap(),
            OrderStatus::OnTheWay
        );
        assert!("on_the_way".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&OrderStatus::OnTheWay).unwrap();
        assert_eq!(json, "\"On the Way\"");

        let parsed: OrderStatus = serde_json::from_str("\"Delivered\"").unwrap();
        assert_eq!(parsed, OrderStatus::Delivered);
    }
}

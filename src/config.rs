use crate::constants::defaults;
use crate::error::{Result, TrackingError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the channel treats a repeated `trackOrder` for an order that is
/// already being tracked on the same connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Cancel the running session and restart from the initial status.
    ResetExisting,
    /// Refuse the request and leave the running session untouched.
    RejectDuplicate,
    /// Spawn an additional independent session per request.
    AllowMultiple,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reset_existing" => Ok(Self::ResetExisting),
            "reject_duplicate" => Ok(Self::RejectDuplicate),
            "allow_multiple" => Ok(Self::AllowMultiple),
            _ => Err(format!("Invalid duplicate policy: {s}")),
        }
    }
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self::ResetExisting
    }
}

/// Tracking core configuration.
///
/// The cadence and the status sequence length are parameters of the design,
/// not constants baked into the mechanism.
#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Milliseconds between status advancements
    pub advance_interval_ms: u64,
    /// Behavior on duplicate track requests for the same (connection, order)
    pub duplicate_policy: DuplicatePolicy,
    /// Verify orders against the attached store before starting a session.
    /// Has no effect when no store is attached.
    pub verify_orders: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            advance_interval_ms: defaults::ADVANCE_INTERVAL_MS,
            duplicate_policy: DuplicatePolicy::default(),
            verify_orders: false,
        }
    }
}

impl TrackingConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    // Takes the variable lookup as a closure so tests never have to mutate
    // process-wide environment state.
    fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(interval) = lookup("ORDERTRACK_ADVANCE_INTERVAL_MS") {
            config.advance_interval_ms = interval.parse().map_err(|e| {
                TrackingError::Configuration {
                    message: format!("Invalid advance_interval_ms: {e}"),
                }
            })?;
        }

        if let Some(policy) = lookup("ORDERTRACK_DUPLICATE_POLICY") {
            config.duplicate_policy =
                policy
                    .parse()
                    .map_err(|e| TrackingError::Configuration {
                        message: format!("Invalid duplicate_policy: {e}"),
                    })?;
        }

        if let Some(verify) = lookup("ORDERTRACK_VERIFY_ORDERS") {
            config.verify_orders = verify.parse().map_err(|e| {
                TrackingError::Configuration {
                    message: format!("Invalid verify_orders: {e}"),
                }
            })?;
        }

        Ok(config)
    }

    /// Get the advancement cadence as a Duration
    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }
}

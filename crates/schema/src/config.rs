//! Decode and validation configuration
//!
//! [`DecodeConfig`] controls how [`decode`](crate::decode) and
//! [`validate`](crate::validate) walk a value tree. It is plain data: build
//! one per call site, or deserialize it from a plugin's own settings.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Maximum schema nesting depth visited by default
pub const DEFAULT_MAX_DEPTH: usize = 128;

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

/// Settings for one decode or validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Maximum nesting depth (default: 128)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Report null values in Required attributes (default: true)
    ///
    /// Turn off when decoding prior state, where required attributes may
    /// legitimately be null.
    #[serde(default = "default_true")]
    pub enforce_required: bool,

    /// Run attribute validators during validation (default: true)
    #[serde(default = "default_true")]
    pub run_validators: bool,

    /// Reject the call if this instant has already passed on entry
    #[serde(skip)]
    pub deadline: Option<Instant>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        DecodeConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            enforce_required: true,
            run_validators: true,
            deadline: None,
        }
    }
}

impl DecodeConfig {
    /// Small limits for testing
    pub fn with_small_limits() -> Self {
        DecodeConfig {
            max_depth: 4,
            ..DecodeConfig::default()
        }
    }

    /// Settings for decoding prior state
    pub fn for_state() -> Self {
        DecodeConfig {
            enforce_required: false,
            run_validators: false,
            ..DecodeConfig::default()
        }
    }

    /// Set the deadline (builder pattern)
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Check if the deadline has passed
    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}

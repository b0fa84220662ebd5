//! Framer configuration
//!
//! Passed at construction. The defaults reproduce the classic protocol
//! behavior exactly: no debug output and no frame abandonment.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-framer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FramerConfig {
    /// Log every sent record and every completed receive attempt
    pub debug: bool,
    /// Consecutive empty polls tolerated mid-frame before the frame is
    /// abandoned. `None` waits forever.
    pub stall_limit: Option<u16>,
}

impl FramerConfig {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            debug: false,
            stall_limit: None,
        }
    }

    /// Enable or disable debug logging
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Abandon a partial frame after `polls` consecutive empty polls
    ///
    /// A limit of 0 behaves like 1.
    pub const fn with_stall_limit(mut self, polls: u16) -> Self {
        self.stall_limit = Some(polls);
        self
    }
}

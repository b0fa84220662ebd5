//! Receive diagnostics
//!
//! `poll_receive` folds every outcome other than a good frame into `false`.
//! The types here keep the distinction for callers that need it.

/// What a single poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No complete frame yet (includes "no bytes available")
    Pending,
    /// A checksum-valid record was copied into the bound buffer
    Received,
    /// Second header byte was wrong; parser resynchronized
    HeaderMismatch(u8),
    /// LENGTH byte did not match the configured record size
    LengthMismatch(u8),
    /// Frame completed but the CRC did not match; record untouched
    ChecksumMismatch {
        /// CRC byte carried by the frame
        received: u8,
        /// CRC computed over the received payload
        computed: u8,
    },
    /// Partial frame dropped after the configured stall limit
    Abandoned,
}

impl PollOutcome {
    /// Returns true if a new record was delivered
    pub fn is_received(&self) -> bool {
        matches!(self, PollOutcome::Received)
    }

    /// Returns true if this poll detected corruption or dropped a frame
    pub fn is_error(&self) -> bool {
        !matches!(self, PollOutcome::Pending | PollOutcome::Received)
    }
}

/// Running link counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramerStats {
    /// Frames written by `send`
    pub frames_sent: u32,
    /// Checksum-valid frames delivered
    pub frames_received: u32,
    /// Frames rejected on CRC
    pub checksum_errors: u32,
    /// Second header byte mismatches
    pub header_errors: u32,
    /// LENGTH field mismatches
    pub length_errors: u32,
    /// Partial frames dropped by the stall limit
    pub frames_abandoned: u32,
    /// Bytes skipped while hunting for HEADER_1
    pub bytes_discarded: u32,
}

impl FramerStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            frames_sent: 0,
            frames_received: 0,
            checksum_errors: 0,
            header_errors: 0,
            length_errors: 0,
            frames_abandoned: 0,
            bytes_discarded: 0,
        }
    }

    /// Fold a poll outcome into the counters
    pub(crate) fn record(&mut self, outcome: PollOutcome) {
        let counter = match outcome {
            PollOutcome::Pending => return,
            PollOutcome::Received => &mut self.frames_received,
            PollOutcome::HeaderMismatch(_) => &mut self.header_errors,
            PollOutcome::LengthMismatch(_) => &mut self.length_errors,
            PollOutcome::ChecksumMismatch { .. } => &mut self.checksum_errors,
            PollOutcome::Abandoned => &mut self.frames_abandoned,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total rejected or dropped frames
    pub fn total_errors(&self) -> u32 {
        self.checksum_errors
            .saturating_add(self.header_errors)
            .saturating_add(self.length_errors)
            .saturating_add(self.frames_abandoned)
    }
}

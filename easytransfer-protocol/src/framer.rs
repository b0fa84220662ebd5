//! Record framer
//!
//! Binds one application record to one transport. [`Framer::send`] writes
//! the record as a frame; [`Framer::poll_receive`] advances a resumable
//! receive state machine over whatever bytes the transport has right now
//! and reports when a checksum-valid record has been copied into the
//! bound buffer.
//!
//! The parser never waits. A frame may arrive over any number of polls,
//! and several states may be passed in one poll if enough bytes are
//! buffered. At most one frame completes per poll.

use easytransfer_hal::ByteTransport;
use heapless::Vec;

use crate::config::FramerConfig;
use crate::crc::crc8;
use crate::diagnostics::{FramerStats, PollOutcome};
use crate::frame::{self, HEADER_1, HEADER_2, MAX_RECORD_LEN};

/// Scratch capacity: largest payload plus its CRC byte
const SCRATCH_CAPACITY: usize = MAX_RECORD_LEN + 1;

/// Framer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Bound record is empty or longer than 255 bytes
    InvalidLength(usize),
    /// Transport read or write failed
    Transport(E),
}

/// Receive state, persisted between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveState {
    /// Scanning for HEADER_1, discarding everything else
    AwaitingHeader1,
    /// Got HEADER_1, next byte must be HEADER_2
    AwaitingHeader2,
    /// Got both headers, next byte must be the record length
    AwaitingLength,
    /// Collecting payload and CRC into the scratch buffer
    AccumulatingPayload,
}

/// Fixed-record framer over a byte transport
#[derive(Debug)]
pub struct Framer<'a, T: ByteTransport> {
    record: &'a mut [u8],
    record_len: u8,
    transport: T,
    config: FramerConfig,
    state: ReceiveState,
    /// Payload + CRC of the frame in progress; its length is the parse cursor
    scratch: Vec<u8, SCRATCH_CAPACITY>,
    idle_polls: u16,
    stats: FramerStats,
}

impl<'a, T: ByteTransport> Framer<'a, T> {
    /// Bind `record` and `transport` with the default configuration
    ///
    /// The record's length is the agreed record size and must be 1..=255.
    pub fn begin(record: &'a mut [u8], transport: T) -> Result<Self, Error<T::Error>> {
        Self::with_config(record, transport, FramerConfig::default())
    }

    /// Bind `record` and `transport` with an explicit configuration
    pub fn with_config(
        record: &'a mut [u8],
        transport: T,
        config: FramerConfig,
    ) -> Result<Self, Error<T::Error>> {
        let len = record.len();
        if len == 0 || len > MAX_RECORD_LEN {
            return Err(Error::InvalidLength(len));
        }

        Ok(Self {
            record,
            record_len: len as u8,
            transport,
            config,
            state: ReceiveState::AwaitingHeader1,
            scratch: Vec::new(),
            idle_polls: 0,
            stats: FramerStats::new(),
        })
    }

    /// Transmit the bound record as one frame
    ///
    /// Writes `record_len + 4` bytes. Receive state is not touched.
    pub fn send(&mut self) -> Result<(), Error<T::Error>> {
        let crc = crc8(self.record);

        self.transport
            .write_all(&frame::header(self.record_len))
            .map_err(Error::Transport)?;
        self.transport
            .write_all(self.record)
            .map_err(Error::Transport)?;
        self.transport.write_byte(crc).map_err(Error::Transport)?;

        self.stats.frames_sent = self.stats.frames_sent.saturating_add(1);
        if self.config.debug {
            debug!("Transmitting: {:02x} | CRC {:02x}", &self.record[..], crc);
        }
        Ok(())
    }

    /// Advance the receive state machine
    ///
    /// Returns true exactly when a new checksum-valid record was written
    /// into the bound buffer during this call. Corruption, an incomplete
    /// frame, and transport errors all read as false; use [`Self::poll`]
    /// to tell them apart.
    pub fn poll_receive(&mut self) -> bool {
        matches!(self.poll(), Ok(PollOutcome::Received))
    }

    /// Advance the receive state machine, reporting what happened
    pub fn poll(&mut self) -> Result<PollOutcome, Error<T::Error>> {
        if self.transport.bytes_available() == 0 {
            return Ok(self.idle());
        }
        self.idle_polls = 0;

        let outcome = self.advance()?;
        self.stats.record(outcome);
        Ok(outcome)
    }

    fn advance(&mut self) -> Result<PollOutcome, Error<T::Error>> {
        loop {
            match self.state {
                ReceiveState::AwaitingHeader1 => {
                    let mut found = false;
                    while self.transport.bytes_available() > 0 {
                        if self.read()? == HEADER_1 {
                            found = true;
                            break;
                        }
                        self.stats.bytes_discarded = self.stats.bytes_discarded.saturating_add(1);
                    }
                    if !found {
                        return Ok(PollOutcome::Pending);
                    }
                    self.state = ReceiveState::AwaitingHeader2;
                }
                ReceiveState::AwaitingHeader2 => {
                    if self.transport.bytes_available() == 0 {
                        return Ok(PollOutcome::Pending);
                    }
                    // A mismatching byte is dropped, not re-tried as HEADER_1
                    let byte = self.read()?;
                    if byte != HEADER_2 {
                        trace!("Header corrupted: {:02x}", byte);
                        self.resync();
                        return Ok(PollOutcome::HeaderMismatch(byte));
                    }
                    self.state = ReceiveState::AwaitingLength;
                }
                ReceiveState::AwaitingLength => {
                    if self.transport.bytes_available() == 0 {
                        return Ok(PollOutcome::Pending);
                    }
                    let byte = self.read()?;
                    if byte != self.record_len {
                        trace!("Length {} != expected {}", byte, self.record_len);
                        self.resync();
                        return Ok(PollOutcome::LengthMismatch(byte));
                    }
                    self.scratch.clear();
                    self.state = ReceiveState::AccumulatingPayload;
                }
                ReceiveState::AccumulatingPayload => return self.accumulate(),
            }
        }
    }

    /// Drain available bytes into scratch and validate once full
    fn accumulate(&mut self) -> Result<PollOutcome, Error<T::Error>> {
        let len = self.record_len as usize;

        while self.scratch.len() <= len && self.transport.bytes_available() > 0 {
            let byte = self.read()?;
            // Cannot fail: len + 1 <= SCRATCH_CAPACITY
            let _ = self.scratch.push(byte);
        }
        if self.scratch.len() <= len {
            return Ok(PollOutcome::Pending);
        }

        let (payload, tail) = self.scratch.split_at(len);
        let received = tail[0];
        let computed = crc8(payload);

        let outcome = if received == computed {
            self.record.copy_from_slice(payload);
            PollOutcome::Received
        } else {
            warn!("CRC mismatch: rx {:02x} != calc {:02x}", received, computed);
            PollOutcome::ChecksumMismatch { received, computed }
        };

        if self.config.debug {
            debug!(
                "{:02x} | CRC-Rx {:02x} | CRC-cal {:02x} | Valid {}",
                payload,
                received,
                computed,
                outcome.is_received()
            );
        }

        // Done with this frame either way
        self.resync();
        Ok(outcome)
    }

    /// Account for a poll that found no bytes
    fn idle(&mut self) -> PollOutcome {
        if self.state == ReceiveState::AwaitingHeader1 {
            return PollOutcome::Pending;
        }
        let Some(limit) = self.config.stall_limit else {
            return PollOutcome::Pending;
        };

        self.idle_polls = self.idle_polls.saturating_add(1);
        if self.idle_polls < limit {
            return PollOutcome::Pending;
        }

        warn!("Frame stalled in {:?}, abandoning", self.state);
        self.resync();
        self.stats.record(PollOutcome::Abandoned);
        PollOutcome::Abandoned
    }

    fn read(&mut self) -> Result<u8, Error<T::Error>> {
        self.transport.read_byte().map_err(Error::Transport)
    }

    fn resync(&mut self) {
        self.state = ReceiveState::AwaitingHeader1;
        self.scratch.clear();
        self.idle_polls = 0;
    }

    /// Drop any partial frame and go back to scanning for HEADER_1
    pub fn reset(&mut self) {
        self.resync();
    }

    /// Current receive state
    pub fn state(&self) -> ReceiveState {
        self.state
    }

    /// Payload + CRC bytes collected for the frame in progress
    pub fn cursor(&self) -> usize {
        self.scratch.len()
    }

    /// Configured record size
    pub fn record_len(&self) -> usize {
        self.record_len as usize
    }

    /// The bound record
    pub fn record(&self) -> &[u8] {
        &self.record[..]
    }

    /// The bound record, for filling before `send`
    pub fn record_mut(&mut self) -> &mut [u8] {
        &mut self.record[..]
    }

    /// Active configuration
    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Link counters
    pub fn stats(&self) -> &FramerStats {
        &self.stats
    }

    /// Zero the link counters
    pub fn reset_stats(&mut self) {
        self.stats = FramerStats::new();
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Unbind, returning the transport
    pub fn release(self) -> T {
        self.transport
    }
}

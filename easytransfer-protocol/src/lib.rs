//! EasyTransfer framing protocol
//!
//! Exchanges one fixed-size record between two endpoints over a
//! byte-oriented serial link that does not preserve message boundaries.
//! Both ends bind a record of the same agreed size; either end may send
//! its record at any time, and the receiving end polls until a complete,
//! checksum-valid copy has landed in its own record.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌──────┬──────┬────────┬──────────────┬───────┐
//! │ 0x06 │ 0x85 │ LENGTH │ PAYLOAD      │ CRC-8 │
//! │ 1B   │ 1B   │ 1B     │ LENGTH bytes │ 1B    │
//! └──────┴──────┴────────┴──────────────┴───────┘
//! ```
//!
//! LENGTH must equal the receiver's configured record size; anything else
//! is treated as corruption. The CRC is SMBus CRC-8 over the payload.
//!
//! Receiving is a resumable state machine driven by
//! [`Framer::poll_receive`]. Each call consumes only the bytes the
//! transport already holds and returns immediately.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod crc;
pub mod diagnostics;
pub mod frame;
pub mod framer;

pub use config::FramerConfig;
pub use crc::crc8;
pub use diagnostics::{FramerStats, PollOutcome};
pub use frame::{FrameError, HEADER_1, HEADER_2, MAX_FRAME_SIZE, MAX_RECORD_LEN};
pub use framer::{Error, Framer, ReceiveState};

pub use easytransfer_hal::ByteTransport;

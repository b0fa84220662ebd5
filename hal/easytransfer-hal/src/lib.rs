//! EasyTransfer Hardware Abstraction Layer
//!
//! This crate defines the byte-level transport capability that the
//! framing layer consumes. Anything that can report how many bytes are
//! waiting, hand them out one at a time, and accept bytes for sending
//! can carry EasyTransfer frames.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  easytransfer-protocol (Framer)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  easytransfer-hal (this crate - traits) │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  IoTransport  │       │MemoryTransport│
//! │ (embedded-io) │       │  (host/tests) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Types
//!
//! - [`transport::ByteTransport`] - Non-blocking byte source/sink
//! - [`io::IoTransport`] - Adapter for `embedded-io` serial peripherals
//! - [`memory::MemoryTransport`] - Fixed-capacity in-memory transport

#![no_std]
#![deny(unsafe_code)]

pub mod io;
pub mod memory;
pub mod transport;

// Re-export key types at crate root for convenience
pub use io::{IoError, IoTransport};
pub use memory::{MemoryError, MemoryTransport};
pub use transport::ByteTransport;

//! CRC-8/SMBus checksum
//!
//! Polynomial 0x07, initial value 0x00, no reflection, no final XOR.
//! Computed over the payload bytes only.

use crc::{Crc, CRC_8_SMBUS};

const SMBUS: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// Compute the SMBus CRC-8 of `bytes`
pub fn crc8(bytes: &[u8]) -> u8 {
    SMBUS.checksum(bytes)
}

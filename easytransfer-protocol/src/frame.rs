//! Frame encoding and decoding for the EasyTransfer wire format.
//!
//! Frame format:
//! - HEADER_1 (1 byte): 0x06
//! - HEADER_2 (1 byte): 0x85
//! - LENGTH (1 byte): record size, must match the receiver's configured size
//! - PAYLOAD (LENGTH bytes): raw record bytes
//! - CRC (1 byte): SMBus CRC-8 over PAYLOAD only
//!
//! These helpers work on whole buffers. The resumable byte-at-a-time
//! receive path lives in [`crate::framer`].

use heapless::Vec;

use crate::crc::crc8;

/// First synchronization byte
pub const HEADER_1: u8 = 0x06;

/// Second synchronization byte
pub const HEADER_2: u8 = 0x85;

/// Largest record that fits the one-byte LENGTH field
pub const MAX_RECORD_LEN: usize = 255;

/// Bytes added around the payload (two headers, LENGTH, CRC)
pub const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_RECORD_LEN + FRAME_OVERHEAD;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Record length outside 1..=255
    InvalidLength,
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Frame is incomplete (need more bytes)
    Incomplete,
    /// Synchronization bytes do not match
    BadHeader,
    /// LENGTH field differs from the expected record size
    LengthMismatch,
    /// Checksum mismatch
    InvalidChecksum,
}

/// Total on-wire size of a frame carrying `record_len` bytes
pub const fn frame_len(record_len: usize) -> usize {
    record_len + FRAME_OVERHEAD
}

/// The three bytes that precede a payload of `record_len` bytes
pub const fn header(record_len: u8) -> [u8; 3] {
    [HEADER_1, HEADER_2, record_len]
}

fn check_len(record_len: usize) -> Result<u8, FrameError> {
    if record_len == 0 || record_len > MAX_RECORD_LEN {
        return Err(FrameError::InvalidLength);
    }
    Ok(record_len as u8)
}

/// Encode `record` as a frame into `buffer`
///
/// Returns the number of bytes written
pub fn encode(record: &[u8], buffer: &mut [u8]) -> Result<usize, FrameError> {
    let length = check_len(record.len())?;
    let total = frame_len(record.len());
    if buffer.len() < total {
        return Err(FrameError::BufferTooSmall);
    }

    buffer[..3].copy_from_slice(&header(length));
    buffer[3..3 + record.len()].copy_from_slice(record);
    buffer[3 + record.len()] = crc8(record);

    Ok(total)
}

/// Encode `record` as a frame into a heapless Vec
pub fn encode_to_vec(record: &[u8]) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
    let mut buffer = [0u8; MAX_FRAME_SIZE];
    let len = encode(record, &mut buffer)?;
    let mut vec = Vec::new();
    vec.extend_from_slice(&buffer[..len])
        .map_err(|_| FrameError::BufferTooSmall)?;
    Ok(vec)
}

/// Decode one frame from the start of `bytes`
///
/// The frame must begin at offset 0 and carry exactly `record_len` payload
/// bytes. Returns the validated payload. Trailing bytes are ignored.
pub fn decode(bytes: &[u8], record_len: usize) -> Result<&[u8], FrameError> {
    let length = check_len(record_len)?;
    if bytes.len() < frame_len(record_len) {
        return Err(FrameError::Incomplete);
    }
    if bytes[0] != HEADER_1 || bytes[1] != HEADER_2 {
        return Err(FrameError::BadHeader);
    }
    if bytes[2] != length {
        return Err(FrameError::LengthMismatch);
    }

    let payload = &bytes[3..3 + record_len];
    if crc8(payload) != bytes[3 + record_len] {
        return Err(FrameError::InvalidChecksum);
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_three_byte_record() {
        let mut buffer = [0u8; 16];
        let len = encode(&[0x11, 0x22, 0x33], &mut buffer).unwrap();

        assert_eq!(len, 7);
        assert_eq!(&buffer[..len], &[0x06, 0x85, 0x03, 0x11, 0x22, 0x33, 0xD4]);
    }

    #[test]
    fn test_encode_buffer_too_small() {
        let mut buffer = [0u8; 6];
        let result = encode(&[0x11, 0x22, 0x33], &mut buffer);
        assert_eq!(result, Err(FrameError::BufferTooSmall));
    }

    #[test]
    fn test_encode_rejects_bad_lengths() {
        let mut buffer = [0u8; MAX_FRAME_SIZE + 1];
        assert_eq!(encode(&[], &mut buffer), Err(FrameError::InvalidLength));

        let too_big = [0u8; MAX_RECORD_LEN + 1];
        assert_eq!(encode(&too_big, &mut buffer), Err(FrameError::InvalidLength));
    }

    #[test]
    fn test_encode_max_record() {
        let record = [0xA5u8; MAX_RECORD_LEN];
        let encoded = encode_to_vec(&record).unwrap();

        assert_eq!(encoded.len(), MAX_FRAME_SIZE);
        assert_eq!(encoded[2], 0xFF);
    }

    #[test]
    fn test_decode_roundtrip() {
        let encoded = encode_to_vec(&[1, 2, 3, 4]).unwrap();
        let payload = decode(&encoded, 4).unwrap();
        assert_eq!(payload, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_decode_errors() {
        let encoded = encode_to_vec(&[1, 2, 3, 4]).unwrap();

        assert_eq!(decode(&encoded[..7], 4), Err(FrameError::Incomplete));
        assert_eq!(decode(&encoded, 5), Err(FrameError::Incomplete));
        assert_eq!(decode(&encoded, 3), Err(FrameError::LengthMismatch));

        let mut bad_header = encoded.clone();
        bad_header[1] = 0x00;
        assert_eq!(decode(&bad_header, 4), Err(FrameError::BadHeader));

        let mut bad_crc = encoded.clone();
        bad_crc[7] ^= 0xFF;
        assert_eq!(decode(&bad_crc, 4), Err(FrameError::InvalidChecksum));
    }
}

//! Byte transport abstraction
//!
//! Provides the trait the framing layer uses to talk to a serial link.
//! Chip-specific HALs or host shims implement it.

/// Non-blocking byte source and sink
///
/// Reads never wait: callers ask [`bytes_available`](Self::bytes_available)
/// first and only call [`read_byte`](Self::read_byte) while it is non-zero.
/// Writes may block or buffer, at the implementation's discretion.
pub trait ByteTransport {
    /// Error type for read and write operations
    type Error;

    /// Number of bytes that can be read right now without waiting
    fn bytes_available(&mut self) -> usize;

    /// Read one byte
    ///
    /// Only called when `bytes_available() > 0`.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write one byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write every byte of `data` in order
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

impl<T: ByteTransport + ?Sized> ByteTransport for &mut T {
    type Error = T::Error;

    fn bytes_available(&mut self) -> usize {
        T::bytes_available(self)
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        T::read_byte(self)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        T::write_byte(self, byte)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::write_all(self, data)
    }
}

//! `embedded-io` adapter
//!
//! Wraps any serial peripheral implementing the blocking `embedded-io`
//! traits so it can be handed to a framer.

use embedded_io::{Read, ReadExactError, ReadReady, Write};

use crate::transport::ByteTransport;

/// Error from an `embedded-io` backed transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError<E> {
    /// Peripheral reported end of stream
    Eof,
    /// Underlying peripheral error
    Io(E),
}

impl<E> From<E> for IoError<E> {
    fn from(e: E) -> Self {
        IoError::Io(e)
    }
}

/// Byte transport over an `embedded-io` peripheral
///
/// `ReadReady` only says whether *something* is buffered, so this adapter
/// reports at most one available byte per query. The framer re-queries
/// after each read, which drains the peripheral all the same.
#[derive(Debug)]
pub struct IoTransport<T> {
    inner: T,
}

impl<T> IoTransport<T> {
    /// Wrap a peripheral
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrow the wrapped peripheral
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the wrapped peripheral
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the peripheral
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + ReadReady + Write> ByteTransport for IoTransport<T> {
    type Error = IoError<T::Error>;

    fn bytes_available(&mut self) -> usize {
        // A failing readiness check reports a byte so the caller reads and
        // gets the peripheral error instead of seeing an idle line.
        match self.inner.read_ready() {
            Ok(true) | Err(_) => 1,
            Ok(false) => 0,
        }
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.inner.read_exact(&mut buf).map_err(|e| match e {
            ReadExactError::UnexpectedEof => IoError::Eof,
            ReadExactError::Other(e) => IoError::Io(e),
        })?;
        Ok(buf[0])
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.inner.write_all(&[byte])?;
        Ok(())
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_io::ErrorType;
    use heapless::Vec;

    /// Serial port stand-in with a fixed receive script
    struct FakeUart {
        rx: &'static [u8],
        pos: usize,
        tx: Vec<u8, 16>,
    }

    impl FakeUart {
        fn new(rx: &'static [u8]) -> Self {
            Self {
                rx,
                pos: 0,
                tx: Vec::new(),
            }
        }
    }

    impl ErrorType for FakeUart {
        type Error = Infallible;
    }

    impl Read for FakeUart {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.rx.len() - self.pos);
            buf[..n].copy_from_slice(&self.rx[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    impl ReadReady for FakeUart {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(self.pos < self.rx.len())
        }
    }

    impl Write for FakeUart {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.tx.capacity() - self.tx.len());
            let _ = self.tx.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_reads_until_drained() {
        let mut transport = IoTransport::new(FakeUart::new(&[0x06, 0x85]));

        assert_eq!(transport.bytes_available(), 1);
        assert_eq!(transport.read_byte(), Ok(0x06));
        assert_eq!(transport.bytes_available(), 1);
        assert_eq!(transport.read_byte(), Ok(0x85));
        assert_eq!(transport.bytes_available(), 0);
    }

    #[test]
    fn test_read_past_end_is_eof() {
        let mut transport = IoTransport::new(FakeUart::new(&[]));
        assert_eq!(transport.read_byte(), Err(IoError::Eof));
    }

    /// Peripheral that faults on every operation
    struct DeadUart;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Fault;

    impl embedded_io::Error for Fault {
        fn kind(&self) -> embedded_io::ErrorKind {
            embedded_io::ErrorKind::Other
        }
    }

    impl ErrorType for DeadUart {
        type Error = Fault;
    }

    impl Read for DeadUart {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Err(Fault)
        }
    }

    impl ReadReady for DeadUart {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Err(Fault)
        }
    }

    impl Write for DeadUart {
        fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
            Err(Fault)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Err(Fault)
        }
    }

    #[test]
    fn test_readiness_fault_is_not_idle() {
        let mut transport = IoTransport::new(DeadUart);

        assert_eq!(transport.bytes_available(), 1);
        assert_eq!(transport.read_byte(), Err(IoError::Io(Fault)));
        assert_eq!(transport.write_byte(0x06), Err(IoError::Io(Fault)));
    }

    #[test]
    fn test_writes_reach_peripheral() {
        let mut transport = IoTransport::new(FakeUart::new(&[]));
        transport.write_byte(0x06).unwrap();
        transport.write_all(&[0x85, 0x03]).unwrap();

        assert_eq!(transport.inner().tx.as_slice(), &[0x06, 0x85, 0x03]);
    }
}

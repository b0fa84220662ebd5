//! In-memory transport
//!
//! A fixed-capacity loopback-style transport for host testing and for
//! wiring two framers together without hardware. Bytes queued with
//! [`MemoryTransport::push_rx`] are what the framer reads; bytes the framer
//! writes collect in the transmit queue.

use heapless::{Deque, Vec};

use crate::transport::ByteTransport;

/// Errors from the in-memory transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MemoryError {
    /// Read attempted with nothing queued
    RxEmpty,
    /// Receive queue is full
    RxFull,
    /// Transmit queue is full
    TxFull,
}

/// Transport backed by two fixed-capacity queues
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport<const N: usize> {
    rx: Deque<u8, N>,
    tx: Vec<u8, N>,
}

impl<const N: usize> MemoryTransport<N> {
    /// Create an empty transport
    pub fn new() -> Self {
        Self {
            rx: Deque::new(),
            tx: Vec::new(),
        }
    }

    /// Queue bytes to be read by the framer
    ///
    /// Nothing is queued if the bytes do not all fit.
    pub fn push_rx(&mut self, bytes: &[u8]) -> Result<(), MemoryError> {
        if self.rx.capacity() - self.rx.len() < bytes.len() {
            return Err(MemoryError::RxFull);
        }
        for &byte in bytes {
            self.rx.push_back(byte).map_err(|_| MemoryError::RxFull)?;
        }
        Ok(())
    }

    /// Number of bytes still waiting to be read
    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    /// Bytes written so far
    pub fn tx(&self) -> &[u8] {
        &self.tx
    }

    /// Take everything written so far, leaving the transmit queue empty
    pub fn take_tx(&mut self) -> Vec<u8, N> {
        core::mem::take(&mut self.tx)
    }

    /// Move written bytes into another transport's receive queue
    ///
    /// Models a wire between two endpoints. Bytes that do not fit on the
    /// far side stay queued here.
    pub fn transfer_to<const M: usize>(
        &mut self,
        other: &mut MemoryTransport<M>,
    ) -> Result<usize, MemoryError> {
        let room = other.rx.capacity() - other.rx.len();
        let n = room.min(self.tx.len());
        other.push_rx(&self.tx[..n])?;

        let remaining: Vec<u8, N> = self.tx[n..].iter().copied().collect();
        self.tx = remaining;

        if n == 0 && !self.tx.is_empty() {
            return Err(MemoryError::RxFull);
        }
        Ok(n)
    }
}

impl<const N: usize> ByteTransport for MemoryTransport<N> {
    type Error = MemoryError;

    fn bytes_available(&mut self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.rx.pop_front().ok_or(MemoryError::RxEmpty)
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.tx.push(byte).map_err(|_| MemoryError::TxFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rx_is_fifo() {
        let mut transport = MemoryTransport::<8>::new();
        transport.push_rx(&[1, 2, 3]).unwrap();

        assert_eq!(transport.bytes_available(), 3);
        assert_eq!(transport.read_byte(), Ok(1));
        assert_eq!(transport.read_byte(), Ok(2));
        assert_eq!(transport.read_byte(), Ok(3));
        assert_eq!(transport.bytes_available(), 0);
        assert_eq!(transport.read_byte(), Err(MemoryError::RxEmpty));
    }

    #[test]
    fn test_push_rx_all_or_nothing() {
        let mut transport = MemoryTransport::<4>::new();
        transport.push_rx(&[1, 2, 3]).unwrap();

        assert_eq!(transport.push_rx(&[4, 5]), Err(MemoryError::RxFull));
        assert_eq!(transport.rx_len(), 3);
    }

    #[test]
    fn test_tx_full() {
        let mut transport = MemoryTransport::<2>::new();
        transport.write_byte(1).unwrap();
        transport.write_byte(2).unwrap();

        assert_eq!(transport.write_byte(3), Err(MemoryError::TxFull));
        assert_eq!(transport.tx(), &[1, 2]);
    }

    #[test]
    fn test_take_tx_empties_queue() {
        let mut transport = MemoryTransport::<8>::new();
        transport.write_all(&[9, 8, 7]).unwrap();

        let sent = transport.take_tx();
        assert_eq!(sent.as_slice(), &[9, 8, 7]);
        assert!(transport.tx().is_empty());
    }

    #[test]
    fn test_transfer_partial_when_far_side_small() {
        let mut a = MemoryTransport::<8>::new();
        let mut b = MemoryTransport::<2>::new();
        a.write_all(&[1, 2, 3]).unwrap();

        assert_eq!(a.transfer_to(&mut b), Ok(2));
        assert_eq!(a.tx(), &[3]);
        assert_eq!(b.rx_len(), 2);

        assert_eq!(a.transfer_to(&mut b), Err(MemoryError::RxFull));

        b.read_byte().unwrap();
        assert_eq!(a.transfer_to(&mut b), Ok(1));
        assert!(a.tx().is_empty());
    }
}

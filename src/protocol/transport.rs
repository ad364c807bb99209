//! Transport abstraction: any byte-oriented channel.
//!
//! Concrete implementations:
//! - UART (the command/telemetry link on the board)
//! - in-memory pipes in tests
//!
//! [`SerialLink`](crate::adapters::serial::SerialLink) is generic over
//! `Transport`, so swapping the physical link needs no protocol changes.

use log::debug;

use crate::error::LinkError;

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// [`read`](Self::read) with the transport's error folded into
    /// [`LinkError::ReadFailed`].
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.read(buf).map_err(|e| {
            debug!("transport read: {:?}", e);
            LinkError::ReadFailed
        })
    }

    /// Write the whole of `data` in one call, then flush. A partial write is
    /// reported as [`LinkError::ShortWrite`]; the remainder is dropped.
    fn write_all(&mut self, data: &[u8]) -> Result<(), LinkError> {
        let written = self.write(data).map_err(|e| {
            debug!("transport write: {:?}", e);
            LinkError::WriteFailed
        })?;
        if written != data.len() {
            return Err(LinkError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        self.flush().map_err(|_| LinkError::WriteFailed)
    }
}

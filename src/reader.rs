use std::io::{ErrorKind, Read};

use tracing::trace;

use crate::codec::{decode_header, Request, HEADER_SIZE};
use crate::error::{HeaderError, Result};

/// Reads complete register headers from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete headers.
pub struct HeaderReader<T> {
    inner: T,
}

impl<T: Read> HeaderReader<T> {
    /// Create a new header reader.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Read and decode the next header (blocking).
    ///
    /// Returns `Err(HeaderError::ConnectionClosed)` when EOF is reached,
    /// whether before or in the middle of a header.
    pub fn read_header(&mut self) -> Result<Request> {
        let mut buf = [0u8; HEADER_SIZE];
        let mut filled = 0usize;

        while filled < HEADER_SIZE {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => return Err(HeaderError::ConnectionClosed),
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(HeaderError::Io(err)),
            }
        }

        let req = decode_header(&buf)?;
        trace!(
            is_read = req.is_read,
            addr = req.addr as u64,
            len = req.len as u64,
            "decoded register header"
        );
        Ok(req)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

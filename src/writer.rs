use std::io::{ErrorKind, Write};

use bytes::BytesMut;
use tracing::trace;

use crate::codec::{encode_header_into, Field, RegisterHeader, HEADER_SIZE};
use crate::error::{HeaderError, Result};

/// Writes complete register headers to any `Write` stream.
pub struct HeaderWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> HeaderWriter<T> {
    /// Create a new header writer.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(HEADER_SIZE),
        }
    }

    /// Encode and send a register access request (blocking).
    pub fn send(&mut self, is_read: bool, addr: Field, len: Field) -> Result<()> {
        self.buf.clear();
        encode_header_into(is_read, addr, len, &mut self.buf)?;
        trace!(is_read, addr = addr as u64, len = len as u64, "sending register header");
        self.write_all_buffered()
    }

    /// Write an already-encoded header (blocking).
    pub fn write_header(&mut self, header: &RegisterHeader) -> Result<()> {
        self.buf.clear();
        self.buf.extend_from_slice(header.as_bytes());
        self.write_all_buffered()
    }

    fn write_all_buffered(&mut self) -> Result<()> {
        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(HeaderError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(HeaderError::Io(err)),
            }
        }
        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(HeaderError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

/// Errors that can occur during header encoding/decoding or header I/O.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    /// The address does not fit in the address sub-field alongside the
    /// read/write flag bit.
    #[error("address {addr:#x} overflows the address sub-field (max {max:#x})")]
    AddressOverflow { addr: u64, max: u64 },

    /// The buffer presented for decoding is not exactly one header long.
    #[error("malformed header ({len} bytes, expected {expected})")]
    Malformed { len: usize, expected: usize },

    /// An I/O error occurred while reading or writing a header.
    #[error("header I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete header was transferred.
    #[error("connection closed (incomplete header)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, HeaderError>;

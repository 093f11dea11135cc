//! Fixed-width register access header codec.
//!
//! A register access request or response is preceded by a fixed-size binary
//! header identifying the direction (read or write), the starting register
//! address, and the number of register units to transfer:
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │ rw flag (MSB) | address      │ length                       │
//! │ (FIELD_SIZE bytes, BE)       │ (FIELD_SIZE bytes, BE)       │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The field width is a build-time choice made once per program via the
//! mutually exclusive cargo features `width-8`, `width-16` (default), and
//! `width-32`. Use `default-features = false` when selecting a non-default
//! width. The width fixes [`Field`], [`FIELD_SIZE`], and [`HEADER_SIZE`];
//! collaborators size their buffers and address ranges from those constants,
//! so a producer and consumer built with different widths cannot link
//! against the same crate instantiation.
//!
//! A header produced under one width and decoded under another is out of
//! contract: it either fails length validation or decodes to an unrelated
//! triple. Keep the width consistent across both ends of a link.

#[cfg(not(any(feature = "width-8", feature = "width-16", feature = "width-32")))]
compile_error!("select a field width: enable exactly one of `width-8`, `width-16`, `width-32`");

#[cfg(any(
    all(feature = "width-8", feature = "width-16"),
    all(feature = "width-8", feature = "width-32"),
    all(feature = "width-16", feature = "width-32"),
))]
compile_error!(
    "features `width-8`, `width-16`, and `width-32` are mutually exclusive \
     (disable default features when selecting a non-default width)"
);

pub mod access;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use access::Attributes;
pub use codec::{
    decode_header, encode_header, encode_header_into, Field, RegisterHeader, Request, ADDR_MAX,
    FIELD_SIZE, HEADER_SIZE,
};
pub use error::{HeaderError, Result};
pub use reader::HeaderReader;
pub use writer::HeaderWriter;

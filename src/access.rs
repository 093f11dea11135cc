//! Register access attribute tags.
//!
//! A register table associates each register definition with an attribute
//! set restricting its direction. The header codec never reads or enforces
//! attributes; it only carries the per-request read/write flag. Enforcement
//! belongs to the register-table layer that consumes a decoded
//! [`Request`](crate::codec::Request).

use std::ops::BitOr;

/// A set of access attributes for one register definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes(u8);

impl Attributes {
    /// No restriction: the register accepts reads and writes.
    pub const NONE: Attributes = Attributes(0);
    /// The register rejects writes.
    pub const READ_ONLY: Attributes = Attributes(1 << 0);
    /// The register rejects reads.
    pub const WRITE_ONLY: Attributes = Attributes(1 << 1);

    const ALL_BITS: u8 = Self::READ_ONLY.0 | Self::WRITE_ONLY.0;

    /// The raw bitmask, as stored in a register table.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Reconstruct an attribute set from a raw bitmask.
    ///
    /// Returns `None` if any unknown bit is set.
    pub const fn from_bits(bits: u8) -> Option<Attributes> {
        if bits & !Self::ALL_BITS != 0 {
            return None;
        }
        Some(Attributes(bits))
    }

    /// Returns true if every attribute in `other` is present in `self`.
    pub const fn contains(self, other: Attributes) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no attribute is set.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Attributes {
    type Output = Attributes;

    fn bitor(self, rhs: Attributes) -> Attributes {
        Attributes(self.0 | rhs.0)
    }
}

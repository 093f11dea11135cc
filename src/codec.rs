use bytes::{BufMut, BytesMut};

use crate::error::{HeaderError, Result};

/// Integer type of the address and length sub-fields, fixed by the width
/// feature selected at build time.
#[cfg(feature = "width-8")]
pub type Field = u8;
#[cfg(feature = "width-16")]
pub type Field = u16;
#[cfg(feature = "width-32")]
pub type Field = u32;

/// Width of one sub-field in bytes.
pub const FIELD_SIZE: usize = std::mem::size_of::<Field>();

/// Total header size in bytes: one address sub-field plus one length
/// sub-field.
pub const HEADER_SIZE: usize = 2 * FIELD_SIZE;

/// Largest encodable register address. The most significant bit of the
/// address sub-field carries the read/write flag.
pub const ADDR_MAX: Field = Field::MAX >> 1;

const READ_FLAG: Field = 1 << (Field::BITS - 1);

/// An encoded header: the on-wire representation of one register access
/// request.
///
/// Opaque by design. The bytes are only meaningful through
/// [`encode_header`] and [`decode_header`]; the buffer is always exactly
/// [`HEADER_SIZE`] bytes by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterHeader([u8; HEADER_SIZE]);

impl RegisterHeader {
    /// The raw wire bytes.
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.0
    }

    /// Decode this header.
    ///
    /// Infallible: the buffer length invariant holds by construction, and
    /// every bit pattern of a correctly-sized header decodes to some
    /// in-range triple.
    pub fn decode(&self) -> Request {
        decode_fields(&self.0)
    }
}

impl AsRef<[u8]> for RegisterHeader {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for RegisterHeader {
    type Error = HeaderError;

    fn try_from(src: &[u8]) -> Result<Self> {
        let data = src.try_into().map_err(|_| HeaderError::Malformed {
            len: src.len(),
            expected: HEADER_SIZE,
        })?;
        Ok(Self(data))
    }
}

/// A decoded register access request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// True for a read request, false for a write request.
    pub is_read: bool,
    /// Starting register address, at most [`ADDR_MAX`].
    pub addr: Field,
    /// Number of register units to access. Zero is legal on the wire;
    /// its meaning is up to the consumer.
    pub len: Field,
}

impl Request {
    /// Create a new request.
    pub fn new(is_read: bool, addr: Field, len: Field) -> Self {
        Self { is_read, addr, len }
    }

    /// Encode this request into a header.
    pub fn encode(&self) -> Result<RegisterHeader> {
        encode_header(self.is_read, self.addr, self.len)
    }
}

/// Encode a register access request into a header.
///
/// The read/write flag occupies the most significant bit of the address
/// sub-field, so `addr` must not exceed [`ADDR_MAX`]; larger addresses are
/// rejected, never truncated. `len` spans the full second sub-field and
/// cannot overflow.
pub fn encode_header(is_read: bool, addr: Field, len: Field) -> Result<RegisterHeader> {
    if addr > ADDR_MAX {
        return Err(HeaderError::AddressOverflow {
            addr: addr as u64,
            max: ADDR_MAX as u64,
        });
    }

    let raw = if is_read { addr | READ_FLAG } else { addr };
    let mut data = [0u8; HEADER_SIZE];
    data[..FIELD_SIZE].copy_from_slice(&raw.to_be_bytes());
    data[FIELD_SIZE..].copy_from_slice(&len.to_be_bytes());
    Ok(RegisterHeader(data))
}

/// Encode a register access request, appending the header bytes to `dst`.
pub fn encode_header_into(
    is_read: bool,
    addr: Field,
    len: Field,
    dst: &mut BytesMut,
) -> Result<()> {
    let header = encode_header(is_read, addr, len)?;
    dst.reserve(HEADER_SIZE);
    dst.put_slice(header.as_bytes());
    Ok(())
}

/// Decode a header from a buffer.
///
/// The buffer must be exactly [`HEADER_SIZE`] bytes; any other length is a
/// malformed header, never partially parsed. Decoding never rejects on
/// value: every correctly-sized bit pattern maps to an in-range triple.
pub fn decode_header(src: &[u8]) -> Result<Request> {
    if src.len() != HEADER_SIZE {
        return Err(HeaderError::Malformed {
            len: src.len(),
            expected: HEADER_SIZE,
        });
    }
    Ok(decode_fields(src))
}

fn decode_fields(src: &[u8]) -> Request {
    let raw = Field::from_be_bytes(src[..FIELD_SIZE].try_into().unwrap());
    let len = Field::from_be_bytes(src[FIELD_SIZE..HEADER_SIZE].try_into().unwrap());

    Request {
        is_read: raw & READ_FLAG != 0,
        addr: raw & ADDR_MAX,
        len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_at_range_limits() {
        for (is_read, addr, len) in [
            (false, 0, 0),
            (true, 0, 0),
            (false, ADDR_MAX, Field::MAX),
            (true, ADDR_MAX, Field::MAX),
            (true, 1, 2),
        ] {
            let header = encode_header(is_read, addr, len).unwrap();
            let req = decode_header(header.as_ref()).unwrap();
            assert_eq!(req, Request { is_read, addr, len });
        }
    }

    #[test]
    fn header_is_exactly_two_fields() {
        let header = encode_header(true, 1, 1).unwrap();
        assert_eq!(header.as_ref().len(), HEADER_SIZE);
        assert_eq!(HEADER_SIZE, 2 * FIELD_SIZE);
    }

    #[test]
    fn encode_into_appends_exactly_one_header() {
        let mut buf = BytesMut::new();
        encode_header_into(false, 3, 7, &mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);

        encode_header_into(true, 4, 8, &mut buf).unwrap();
        assert_eq!(buf.len(), 2 * HEADER_SIZE);

        let first = decode_header(&buf[..HEADER_SIZE]).unwrap();
        let second = decode_header(&buf[HEADER_SIZE..]).unwrap();
        assert_eq!(first, Request::new(false, 3, 7));
        assert_eq!(second, Request::new(true, 4, 8));
    }

    #[test]
    fn flag_toggles_only_msb_of_first_byte() {
        let write = encode_header(false, ADDR_MAX / 3, 42).unwrap();
        let read = encode_header(true, ADDR_MAX / 3, 42).unwrap();

        let w = write.as_bytes();
        let r = read.as_bytes();
        assert_eq!(w[0] ^ r[0], 0x80);
        assert_eq!(&w[1..], &r[1..]);
    }

    #[test]
    fn address_above_flag_boundary_is_rejected() {
        let err = encode_header(false, ADDR_MAX + 1, 0).unwrap_err();
        assert!(matches!(err, HeaderError::AddressOverflow { .. }));

        let err = encode_header(true, Field::MAX, 0).unwrap_err();
        assert!(matches!(err, HeaderError::AddressOverflow { .. }));
    }

    #[test]
    fn zero_length_is_legal_on_the_wire() {
        let header = encode_header(true, 5, 0).unwrap();
        let req = decode_header(header.as_ref()).unwrap();
        assert_eq!(req.len, 0);
    }

    #[test]
    fn wrong_size_buffers_are_malformed() {
        for len in [0, HEADER_SIZE - 1, HEADER_SIZE + 1, 2 * HEADER_SIZE] {
            let buf = vec![0u8; len];
            let err = decode_header(&buf).unwrap_err();
            assert!(matches!(
                err,
                HeaderError::Malformed { len: l, expected } if l == len && expected == HEADER_SIZE
            ));
        }
    }

    #[test]
    fn encode_is_deterministic() {
        let a = encode_header(true, 9, 17).unwrap();
        let b = encode_header(true, 9, 17).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn request_encode_roundtrips() {
        let req = Request::new(false, ADDR_MAX, 1);
        assert_eq!(req.encode().unwrap().decode(), req);
    }

    #[test]
    fn try_from_checks_length() {
        let header = encode_header(true, 2, 3).unwrap();
        let copy = RegisterHeader::try_from(header.as_ref()).unwrap();
        assert_eq!(copy, header);

        let err = RegisterHeader::try_from(&header.as_ref()[1..]).unwrap_err();
        assert!(matches!(err, HeaderError::Malformed { .. }));
    }

    #[cfg(feature = "width-8")]
    #[test]
    fn width_8_wire_layout() {
        let header = encode_header(false, 127, 255).unwrap();
        assert_eq!(header.as_bytes(), &[0x7F, 0xFF]);
        assert_eq!(
            decode_header(header.as_ref()).unwrap(),
            Request::new(false, 127, 255)
        );

        let err = encode_header(false, 128, 0).unwrap_err();
        assert!(matches!(err, HeaderError::AddressOverflow { .. }));

        let read = encode_header(true, 0x2A, 1).unwrap();
        assert_eq!(read.as_bytes(), &[0xAA, 0x01]);
    }

    #[cfg(feature = "width-16")]
    #[test]
    fn width_16_wire_layout() {
        let header = encode_header(true, 0x1234, 0x0102).unwrap();
        assert_eq!(header.as_bytes(), &[0x92, 0x34, 0x01, 0x02]);

        let header = encode_header(false, 0x7FFF, 0xFFFF).unwrap();
        assert_eq!(header.as_bytes(), &[0x7F, 0xFF, 0xFF, 0xFF]);
    }

    #[cfg(feature = "width-32")]
    #[test]
    fn width_32_wire_layout() {
        let header = encode_header(true, 0x0102_0304, 0x0A0B_0C0D).unwrap();
        assert_eq!(
            header.as_bytes(),
            &[0x81, 0x02, 0x03, 0x04, 0x0A, 0x0B, 0x0C, 0x0D]
        );
    }
}

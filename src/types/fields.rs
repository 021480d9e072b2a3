//! Readers for length prefixed fields inside key material.

use std::io::BufRead;

use bytes::{BufMut, Bytes, BytesMut};
use num_bigint::BigUint;

use crate::errors::Result;
use crate::parsing_reader::BufReadParsing;

/// ASN.1 tag of an object identifier.
const OID_TAG: u8 = 0x06;

/// Reads a one octet length `n` followed by `n - 2` bytes.
///
/// The returned buffer is `n` bytes long: the read bytes prefixed with `0x06, n`,
/// so the declared length accounts for the re-tagged header.
pub fn read_length_prefixed_field<R: BufRead>(mut r: R) -> Result<Bytes> {
    let n = r.read_u8()?;
    if n < 2 {
        malformed_err!("field length {} is shorter than its header", n);
    }

    let body = r.take_bytes(usize::from(n) - 2)?;

    let mut out = BytesMut::with_capacity(usize::from(n));
    out.put_u8(OID_TAG);
    out.put_u8(n);
    out.extend_from_slice(&body);

    Ok(out.freeze())
}

/// Reads an MPI encoded point: a two octet bit count, followed by
/// `ceil(bits / 8)` big endian bytes.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-multiprecision-integers>
pub fn read_point<R: BufRead>(mut r: R) -> Result<BigUint> {
    let len_bits = r.read_be_u16()?;
    let len_bytes = (usize::from(len_bits) + 7) >> 3;

    let n = r.take_bytes(len_bytes)?;

    Ok(BigUint::from_bytes_be(&n))
}

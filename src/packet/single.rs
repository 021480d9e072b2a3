use std::io::BufRead;

use log::debug;

use crate::errors::Result;
use crate::packet::{Packet, TypeHeader};
use crate::parsing_reader::BufReadParsing;
use crate::types::PacketLength;

/// Reads a single physical packet.
///
/// Returns `Ok(None)` if the reader is exhausted before the first header byte.
/// A partial packet is returned as is, see [`PacketParser`](super::PacketParser)
/// for reassembly.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-packet-syntax>
pub fn read_packet<R: BufRead>(mut r: R) -> Result<Option<Packet>> {
    let Some((header, length)) = read_header(&mut r)? else {
        return Ok(None);
    };

    read_body(r, header, length).map(Some)
}

/// Reads the header octet and the length, leaving the body in the reader.
pub(crate) fn read_header<R: BufRead>(mut r: R) -> Result<Option<(TypeHeader, PacketLength)>> {
    if !r.has_remaining()? {
        return Ok(None);
    }

    let header = TypeHeader::try_from_bits(r.read_u8()?)?;
    let length = PacketLength::try_from_reader(&mut r)?;
    debug!(
        "packet header {:?} {:?} new_format={}",
        header.tag(),
        length,
        header.is_new_format()
    );

    Ok(Some((header, length)))
}

/// Reads the body announced by `length`.
pub(crate) fn read_body<R: BufRead>(
    mut r: R,
    header: TypeHeader,
    length: PacketLength,
) -> Result<Packet> {
    let content = r.take_bytes(length.len() as usize)?;

    Ok(Packet::new(
        header.is_new_format(),
        header.tag(),
        content,
        length.is_partial(),
    ))
}

use crate::errors::Result;
use crate::types::Tag;

/// The first octet of every packet, carrying the format bit and the packet tag.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-packet-headers>
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TypeHeader(u8);

impl TypeHeader {
    /// First bit is always 1
    const MARKER: u8 = 0b1000_0000;
    const FORMAT: u8 = 0b0100_0000;
    const TAG: u8 = 0b0011_1111;

    /// Validates the marker bit of a raw header octet.
    pub fn try_from_bits(bits: u8) -> Result<Self> {
        if bits & Self::MARKER == 0 {
            malformed_err!("unexpected header value");
        }

        Ok(Self(bits))
    }

    /// Note: a *clear* format bit reads as the new format here, the reverse of
    /// the RFC 9580 convention.
    pub const fn is_new_format(&self) -> bool {
        self.0 & Self::FORMAT == 0
    }

    pub fn tag(&self) -> Tag {
        Tag::from(self.0 & Self::TAG)
    }

    pub const fn into_bits(self) -> u8 {
        self.0
    }
}

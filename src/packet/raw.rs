use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
use snafu::ensure;

use crate::errors::{InvalidMergeSnafu, Result};
use crate::types::Tag;

/// A single framed packet: header attributes plus the undecoded body.
///
/// Packets are immutable, [`Packet::merge`] builds a new one.
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct Packet {
    is_new_format: bool,
    tag: Tag,
    #[debug("{}", hex::encode(content))]
    content: Bytes,
    is_partial: bool,
}

impl Packet {
    pub fn new(is_new_format: bool, tag: Tag, content: impl Into<Bytes>, is_partial: bool) -> Self {
        Self {
            is_new_format,
            tag,
            content: content.into(),
            is_partial,
        }
    }

    pub fn is_new_format(&self) -> bool {
        self.is_new_format
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// More content for the same logical packet follows.
    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }

    /// Appends `right` to the partial packet `left`.
    ///
    /// Format and tag are taken from `left`, the partial flag from `right`.
    pub fn merge(left: &Packet, right: &Packet) -> Result<Packet> {
        ensure!(
            left.is_partial,
            InvalidMergeSnafu {
                message: "cannot append onto non-partial packet",
            }
        );
        ensure!(
            left.is_new_format == right.is_new_format,
            InvalidMergeSnafu {
                message: "cannot append packet of different format",
            }
        );
        ensure!(
            left.tag == right.tag,
            InvalidMergeSnafu {
                message: "cannot append packet of different type",
            }
        );

        debug!(
            "merging {:?}: {} + {} bytes",
            left.tag,
            left.content.len(),
            right.content.len()
        );

        let mut content = BytesMut::with_capacity(left.content.len() + right.content.len());
        content.put_slice(&left.content);
        content.put_slice(&right.content);

        Ok(Packet {
            is_new_format: left.is_new_format,
            tag: left.tag,
            content: content.freeze(),
            is_partial: right.is_partial,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::errors::Error;

    fn packet(tag: u8, content: &[u8], is_partial: bool) -> Packet {
        Packet::new(true, Tag::from(tag), content.to_vec(), is_partial)
    }

    #[test]
    fn test_merge_partial_with_terminal() {
        let left = packet(5, &[1, 2], true);
        let right = packet(5, &[3], false);

        let merged = Packet::merge(&left, &right).unwrap();
        assert_eq!(merged, packet(5, &[1, 2, 3], false));

        // inputs are untouched
        assert_eq!(&left.content()[..], &[1, 2]);
        assert_eq!(&right.content()[..], &[3]);
    }

    #[test]
    fn test_merge_two_partials_stays_partial() {
        let merged =
            Packet::merge(&packet(11, &[0xAA], true), &packet(11, &[0xBB], true)).unwrap();
        assert!(merged.is_partial());
        assert_eq!(&merged.content()[..], &[0xAA, 0xBB]);
    }

    #[test]
    fn test_merge_onto_terminal_fails() {
        let err = Packet::merge(&packet(5, &[1], false), &packet(5, &[2], false)).unwrap_err();
        assert!(matches!(err, Error::InvalidMerge { .. }));
    }

    #[test]
    fn test_merge_different_type_fails() {
        let err = Packet::merge(&packet(5, &[1], true), &packet(6, &[2], false)).unwrap_err();
        assert!(matches!(err, Error::InvalidMerge { .. }));
    }

    #[test]
    fn test_merge_different_format_fails() {
        let left = Packet::new(true, Tag::LiteralData, vec![1], true);
        let right = Packet::new(false, Tag::LiteralData, vec![2], false);
        let err = Packet::merge(&left, &right).unwrap_err();
        assert!(matches!(err, Error::InvalidMerge { .. }));
    }

    #[test]
    fn test_debug_hex_content() {
        let p = packet(13, b"ab", false);
        assert_eq!(
            format!("{p:?}"),
            "Packet { is_new_format: true, tag: UserId, content: 6162, is_partial: false }"
        );
    }

    proptest! {
        #[test]
        fn merge_concatenates(tag in 0u8..64, fmt: bool, a: Vec<u8>, b: Vec<u8>, right_partial: bool) {
            let left = Packet::new(fmt, Tag::from(tag), a.clone(), true);
            let right = Packet::new(fmt, Tag::from(tag), b.clone(), right_partial);

            let merged = Packet::merge(&left, &right).unwrap();
            let mut expected = a;
            expected.extend_from_slice(&b);

            prop_assert_eq!(&merged.content()[..], &expected[..]);
            prop_assert_eq!(merged.is_partial(), right_partial);
            prop_assert_eq!(merged.tag(), Tag::from(tag));
            prop_assert_eq!(merged.is_new_format(), fmt);
        }

        #[test]
        fn merge_rejects_mismatch(
            left_partial: bool,
            left_fmt: bool,
            right_fmt: bool,
            left_tag in 0u8..64,
            right_tag in 0u8..64
        ) {
            prop_assume!(!left_partial || left_fmt != right_fmt || left_tag != right_tag);

            let left = Packet::new(left_fmt, Tag::from(left_tag), vec![1], left_partial);
            let right = Packet::new(right_fmt, Tag::from(right_tag), vec![2], false);

            let is_invalid_merge = matches!(
                Packet::merge(&left, &right),
                Err(Error::InvalidMerge { .. })
            );
            prop_assert!(is_invalid_merge);
        }
    }
}

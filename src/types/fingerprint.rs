use std::fmt;

use byteorder::{BigEndian, WriteBytesExt};
use log::debug;

use crate::crypto::hash::HashAlgorithm;
use crate::errors::{Error, Result};

/// Prefix octet of the v4 fingerprint preimage.
const V4_PREFIX: u8 = 0x99;

/// Represents a Fingerprint.
#[derive(Clone, Eq, PartialEq, Hash, derive_more::Debug)]
pub enum Fingerprint {
    #[debug("{}", hex::encode(_0))]
    V4([u8; 20]),

    /// Same preimage as [`Fingerprint::V4`], digested with another hash algorithm.
    #[debug("{}", hex::encode(_0))]
    Other(Vec<u8>),
}

impl Fingerprint {
    /// Calculates the v4 fingerprint of an encoded public key body.
    ///
    /// This is the SHA1 hash of `0x99`, the two octet length of the body and the body itself.
    ///
    /// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-version-4-key-ids-and-finge>
    pub fn v4(encoded_public_key: &[u8]) -> Result<Self> {
        Self::with_hash(HashAlgorithm::Sha1, encoded_public_key)
    }

    /// Calculates the fingerprint over the v4 preimage using the given hash algorithm.
    pub fn with_hash(hash: HashAlgorithm, encoded_public_key: &[u8]) -> Result<Self> {
        let len: u16 = encoded_public_key
            .len()
            .try_into()
            .map_err(|_| Error::InvalidInput)?;

        let mut preimage = Vec::with_capacity(3 + encoded_public_key.len());
        preimage.push(V4_PREFIX);
        preimage.write_u16::<BigEndian>(len)?;
        preimage.extend_from_slice(encoded_public_key);

        debug!("fingerprinting {} bytes with {}", len, hash);
        let digest = hash.digest(&preimage)?;

        let fp = match hash {
            HashAlgorithm::Sha1 => {
                Fingerprint::V4(digest.try_into().map_err(|_| Error::InvalidInput)?)
            }
            _ => Fingerprint::Other(digest),
        };

        Ok(fp)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        match self {
            Self::V4(_) => 20,
            Self::Other(fp) => fp.len(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::V4(fp) => &fp[..],
            Self::Other(fp) => fp,
        }
    }
}

impl AsRef<[u8]> for Fingerprint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Upper case hex, the way key listings print it.
impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.as_bytes()))
    }
}

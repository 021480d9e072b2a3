//! Interpretation of public-key packet bodies.
//!
//! Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-public-key-packet-formats>

use std::io::BufRead;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use log::debug;
use num_bigint::BigUint;
use num_enum::{FromPrimitive, IntoPrimitive};

use crate::crypto::{EccCurve, PublicKeyAlgorithm};
use crate::errors::Result;
use crate::packet::Packet;
use crate::parsing_reader::BufReadParsing;
use crate::types::{read_point, Fingerprint};

/// Version of a key packet body.
#[derive(Debug, PartialEq, Eq, Clone, Copy, FromPrimitive, IntoPrimitive)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[repr(u8)]
pub enum KeyVersion {
    V2 = 2,
    V3 = 3,
    V4 = 4,
    V5 = 5,
    V6 = 6,

    #[num_enum(catch_all)]
    #[cfg_attr(test, proptest(skip))]
    Other(u8),
}

/// The fields every public key body starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyPreamble {
    pub version: KeyVersion,
    pub created_at: DateTime<Utc>,
    /// Validity in days, only present in v2 and v3 keys.
    pub expiration: Option<u16>,
    pub algorithm: PublicKeyAlgorithm,
}

impl PublicKeyPreamble {
    pub fn try_from_reader<R: BufRead>(mut r: R) -> Result<Self> {
        let version = r.read_u8().map(KeyVersion::from)?;
        let created_at = match Utc.timestamp_opt(i64::from(r.read_be_u32()?), 0).single() {
            Some(created_at) => created_at,
            None => malformed_err!("invalid created at timestamp"),
        };

        let expiration = match version {
            KeyVersion::V2 | KeyVersion::V3 => Some(r.read_be_u16()?),
            KeyVersion::V4 => None,
            KeyVersion::V5 | KeyVersion::V6 | KeyVersion::Other(_) => {
                unsupported_err!("key version {:?}", version);
            }
        };
        let algorithm = r.read_u8().map(PublicKeyAlgorithm::from)?;

        Ok(PublicKeyPreamble {
            version,
            created_at,
            expiration,
            algorithm,
        })
    }
}

/// ECDSA public key material: curve OID and the encoded public point.
///
/// Ref: <https://www.rfc-editor.org/rfc/rfc9580.html#name-algorithm-specific-part-for-ecd>
#[derive(Clone, PartialEq, Eq, derive_more::Debug)]
pub struct EcdsaPublicParams {
    pub curve: EccCurve,
    /// Raw OID bytes, without length or ASN.1 tag.
    #[debug("{}", hex::encode(oid))]
    pub oid: Bytes,
    #[debug("{}", point.to_str_radix(16))]
    pub point: BigUint,
}

/// Reads the one octet length and the OID bytes that start ECDSA, ECDH and
/// legacy EdDSA key material.
fn read_curve_oid<R: BufRead>(mut r: R) -> Result<(EccCurve, Bytes)> {
    // 0 and 0xFF are reserved for future extensions
    let oid_len = r.read_u8()?;
    if oid_len == 0 || oid_len == 0xFF {
        unsupported_err!("curve oid length {}", oid_len);
    }

    let oid = r.take_bytes(oid_len.into())?;
    let Some(curve) = EccCurve::from_oid(&oid) else {
        malformed_err!("invalid curve oid {}", hex::encode(&oid));
    };

    Ok((curve, oid))
}

impl EcdsaPublicParams {
    pub fn try_from_reader<R: BufRead>(mut r: R) -> Result<Self> {
        let (curve, oid) = read_curve_oid(&mut r)?;
        if curve.pubkey_algo().is_some() {
            unsupported_err!("curve {} is not usable with ECDSA", curve);
        }

        let point = read_point(&mut r)?;

        // uncompressed SEC1 point: 0x04 || x || y
        let nbits = usize::from(curve.nbits());
        if nbits > 0 {
            let max_len = 1 + 2 * nbits.div_ceil(8);
            let len = point.bits().div_ceil(8);
            if len > max_len {
                malformed_err!("invalid public key length {} for {}", len, curve);
            }
        }
        debug!("ecdsa key on {}, {} bit point", curve, point.bits());

        Ok(EcdsaPublicParams { curve, oid, point })
    }
}

/// A decoded v4 public key packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    preamble: PublicKeyPreamble,
    curve: Option<EccCurve>,
    ecdsa: Option<EcdsaPublicParams>,
    fingerprint: Fingerprint,
}

impl PublicKey {
    /// Decodes the body of `packet`. The packet tag is not checked.
    pub fn from_packet(packet: &Packet) -> Result<Self> {
        Self::try_from_body(packet.content())
    }

    /// Decodes a v4 public key body.
    ///
    /// ECDSA material is decoded completely. For ECDH and legacy EdDSA only the
    /// curve is read, other algorithms are left undecoded.
    pub fn try_from_body(body: &[u8]) -> Result<Self> {
        let mut r = body;
        let preamble = PublicKeyPreamble::try_from_reader(&mut r)?;
        if preamble.version != KeyVersion::V4 {
            unsupported_err!("fingerprint for key version {:?}", preamble.version);
        }

        let (curve, ecdsa) = match preamble.algorithm {
            PublicKeyAlgorithm::ECDSA => {
                let params = EcdsaPublicParams::try_from_reader(&mut r)?;
                if !r.is_empty() {
                    malformed_err!("{} trailing bytes after ecdsa key material", r.len());
                }
                (Some(params.curve.clone()), Some(params))
            }
            alg if alg.has_curve_oid() => {
                let (curve, _) = read_curve_oid(&mut r)?;
                (Some(curve), None)
            }
            _ => (None, None),
        };

        let fingerprint = Fingerprint::v4(body)?;

        Ok(PublicKey {
            preamble,
            curve,
            ecdsa,
            fingerprint,
        })
    }

    pub fn version(&self) -> KeyVersion {
        self.preamble.version
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.preamble.created_at
    }

    pub fn algorithm(&self) -> PublicKeyAlgorithm {
        self.preamble.algorithm
    }

    /// The curve of ECDSA, ECDH and legacy EdDSA keys.
    pub fn curve(&self) -> Option<&EccCurve> {
        self.curve.as_ref()
    }

    pub fn ecdsa(&self) -> Option<&EcdsaPublicParams> {
        self.ecdsa.as_ref()
    }

    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::errors::Error;
    use crate::types::Tag;

    const P256_KEY_BODY: [u8; 82] = hex!(
        "046132aa9213082a8648ce3d030107020304c0073e93f4604c22d4001b245f0a"
        "da6d6159562be9e5213ce732d7c5dbcb67fc67e41f6b522fb346da1672633933"
        "2c16f0f796108690cbc9caf76ce2d5af1168"
    );

    #[test]
    fn test_preamble() {
        let mut r = &P256_KEY_BODY[..];
        let preamble = PublicKeyPreamble::try_from_reader(&mut r).unwrap();

        assert_eq!(preamble.version, KeyVersion::V4);
        assert_eq!(
            preamble.created_at,
            Utc.with_ymd_and_hms(2021, 9, 3, 23, 6, 58).unwrap()
        );
        assert_eq!(preamble.expiration, None);
        assert_eq!(preamble.algorithm, PublicKeyAlgorithm::ECDSA);
        assert_eq!(r.len(), 82 - 6);
    }

    #[test]
    fn test_preamble_v3_expiration() {
        let raw = hex!("03 00000001 000a 01");
        let preamble = PublicKeyPreamble::try_from_reader(&raw[..]).unwrap();
        assert_eq!(preamble.version, KeyVersion::V3);
        assert_eq!(preamble.expiration, Some(10));
        assert_eq!(preamble.algorithm, PublicKeyAlgorithm::RSA);
    }

    #[test]
    fn test_preamble_unsupported_version() {
        let err = PublicKeyPreamble::try_from_reader(&hex!("05 00000001 13")[..]).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn test_ecdsa_params() {
        let params = EcdsaPublicParams::try_from_reader(&P256_KEY_BODY[6..]).unwrap();

        assert_eq!(params.curve, EccCurve::P256);
        assert_eq!(&params.oid[..], &hex!("2a8648ce3d030107")[..]);
        assert_eq!(params.point.bits(), 515);
        assert_eq!(params.point.to_bytes_be(), &P256_KEY_BODY[17..]);
    }

    #[test]
    fn test_ecdsa_params_reserved_oid_len() {
        for raw in [&hex!("00 0003 04")[..], &hex!("ff 0003 04")[..]] {
            let err = EcdsaPublicParams::try_from_reader(raw).unwrap_err();
            assert!(matches!(err, Error::Unsupported { .. }));
        }
    }

    #[test]
    fn test_ecdsa_params_eddsa_curve() {
        let raw = hex!("09 2b06010401da470f01 0008 40");
        let err = EcdsaPublicParams::try_from_reader(&raw[..]).unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }

    #[test]
    fn test_public_key_from_packet() {
        let _ = pretty_env_logger::try_init();

        let packet = Packet::new(false, Tag::Other(0x18), P256_KEY_BODY.to_vec(), false);
        let key = PublicKey::from_packet(&packet).unwrap();

        assert_eq!(key.version(), KeyVersion::V4);
        assert_eq!(key.algorithm(), PublicKeyAlgorithm::ECDSA);
        assert_eq!(key.ecdsa().unwrap().curve, EccCurve::P256);
        assert_eq!(key.curve(), Some(&EccCurve::P256));
        assert_eq!(
            key.fingerprint().as_bytes(),
            &hex!("7d9e5f680df09f6b34e742555c27ae393fdd4968")[..]
        );
    }

    #[test]
    fn test_public_key_other_algorithm_is_opaque() {
        // RSA with a tiny made up modulus and exponent
        let body = hex!("04 00000001 01 0008 c3 0002 03");
        let key = PublicKey::try_from_body(&body).unwrap();

        assert_eq!(key.algorithm(), PublicKeyAlgorithm::RSA);
        assert!(key.ecdsa().is_none());
        assert!(key.curve().is_none());
        assert_eq!(key.fingerprint(), &Fingerprint::v4(&body).unwrap());
    }

    #[test]
    fn test_public_key_eddsa_legacy_curve() {
        // Ed25519 oid followed by a 0x40 prefixed point
        let mut body = hex!("04 00000001 16 09 2b06010401da470f01 0107 40").to_vec();
        body.extend_from_slice(&[0x11; 32]);

        let key = PublicKey::try_from_body(&body).unwrap();
        assert_eq!(key.algorithm(), PublicKeyAlgorithm::EdDSALegacy);
        assert_eq!(key.curve(), Some(&EccCurve::Ed25519));
        assert!(key.ecdsa().is_none());
    }

    #[test]
    fn test_ecdsa_params_point_too_long() {
        // P-256 oid with a 66 byte point
        let mut raw = hex!("08 2a8648ce3d030107 020b 04").to_vec();
        raw.extend_from_slice(&[0x11; 65]);

        let err = EcdsaPublicParams::try_from_reader(&raw[..]).unwrap_err();
        assert!(matches!(err, Error::MalformedPacket { .. }));
    }

    #[test]
    fn test_public_key_trailing_bytes() {
        let mut body = P256_KEY_BODY.to_vec();
        body.push(0);
        let err = PublicKey::try_from_body(&body).unwrap_err();
        assert!(matches!(err, Error::MalformedPacket { .. }));
    }

    #[test]
    fn test_public_key_truncated() {
        let err = PublicKey::try_from_body(&P256_KEY_BODY[..40]).unwrap_err();
        assert!(err.is_incomplete());
    }
}

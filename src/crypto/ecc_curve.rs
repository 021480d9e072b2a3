use const_oid::ObjectIdentifier;

use crate::crypto::public_key::PublicKeyAlgorithm;

/// Curves that can show up in ECDSA, ECDH and EdDSA key material.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EccCurve {
    Curve25519,
    Ed25519,
    P256,
    P384,
    P521,
    BrainpoolP256r1,
    BrainpoolP384r1,
    BrainpoolP512r1,
    Secp256k1,
    Unknown(ObjectIdentifier),
}

const KNOWN: [(EccCurve, ObjectIdentifier); 9] = [
    (
        EccCurve::Curve25519,
        ObjectIdentifier::new_unwrap("1.3.6.1.4.1.3029.1.5.1"),
    ),
    (
        EccCurve::Ed25519,
        ObjectIdentifier::new_unwrap("1.3.6.1.4.1.11591.15.1"),
    ),
    (
        EccCurve::P256,
        ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
    ),
    (EccCurve::P384, ObjectIdentifier::new_unwrap("1.3.132.0.34")),
    (EccCurve::P521, ObjectIdentifier::new_unwrap("1.3.132.0.35")),
    (
        EccCurve::BrainpoolP256r1,
        ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.7"),
    ),
    (
        EccCurve::BrainpoolP384r1,
        ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.11"),
    ),
    (
        EccCurve::BrainpoolP512r1,
        ObjectIdentifier::new_unwrap("1.3.36.3.3.2.8.1.1.13"),
    ),
    (
        EccCurve::Secp256k1,
        ObjectIdentifier::new_unwrap("1.3.132.0.10"),
    ),
];

impl EccCurve {
    /// Standard name
    pub fn name(&self) -> &str {
        match self {
            EccCurve::Curve25519 => "Curve25519",
            EccCurve::Ed25519 => "Ed25519",
            EccCurve::P256 => "NIST P-256",
            EccCurve::P384 => "NIST P-384",
            EccCurve::P521 => "NIST P-521",
            EccCurve::BrainpoolP256r1 => "brainpoolP256r1",
            EccCurve::BrainpoolP384r1 => "brainpoolP384r1",
            EccCurve::BrainpoolP512r1 => "brainpoolP512r1",
            EccCurve::Secp256k1 => "secp256k1",
            EccCurve::Unknown(_) => "unknown",
        }
    }

    /// Nominal bit length of the curve, 0 if unknown.
    pub fn nbits(&self) -> u16 {
        match self {
            EccCurve::Curve25519 | EccCurve::Ed25519 => 255,
            EccCurve::P256 | EccCurve::BrainpoolP256r1 | EccCurve::Secp256k1 => 256,
            EccCurve::P384 | EccCurve::BrainpoolP384r1 => 384,
            EccCurve::BrainpoolP512r1 => 512,
            EccCurve::P521 => 521,
            EccCurve::Unknown(_) => 0,
        }
    }

    /// Required algo, or None for ECDSA/ECDH
    pub fn pubkey_algo(&self) -> Option<PublicKeyAlgorithm> {
        match self {
            EccCurve::Curve25519 => Some(PublicKeyAlgorithm::ECDH),
            EccCurve::Ed25519 => Some(PublicKeyAlgorithm::EdDSALegacy),
            _ => None,
        }
    }

    pub fn oid(&self) -> ObjectIdentifier {
        if let EccCurve::Unknown(oid) = self {
            return *oid;
        }

        KNOWN
            .iter()
            .find(|(curve, _)| curve == self)
            .map(|(_, oid)| *oid)
            .unwrap_or_else(|| unreachable!("every named curve has an oid"))
    }

    /// Looks up the curve for the raw (untagged) bytes of an OID.
    ///
    /// Returns `None` if the bytes are not a valid OID encoding at all.
    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        if let Some((curve, _)) = KNOWN.iter().find(|(_, known)| known.as_bytes() == oid) {
            return Some(curve.clone());
        }

        ObjectIdentifier::from_bytes(oid).ok().map(EccCurve::Unknown)
    }

    /// Looks up the curve for a field produced by
    /// [`read_length_prefixed_field`](crate::types::read_length_prefixed_field),
    /// which carries a two byte `0x06, len` header in front of the OID bytes.
    pub fn from_tagged_oid(field: &[u8]) -> Option<Self> {
        match field {
            [0x06, _, oid @ ..] => Self::from_oid(oid),
            _ => None,
        }
    }
}

impl std::fmt::Display for EccCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

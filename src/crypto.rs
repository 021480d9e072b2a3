//! # Cryptography module
//!
//! Algorithm identifiers and the hashing used for fingerprints.

pub mod ecc_curve;
pub mod hash;
pub mod public_key;

pub use self::{ecc_curve::EccCurve, hash::HashAlgorithm, public_key::PublicKeyAlgorithm};

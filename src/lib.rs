//! # pgp-framing
//!
//! Splits OpenPGP binary streams into packets.
//!
//! The crate reads the tag-length framing of a packet stream and stitches partial
//! body chunks back into logical packets. Public key bodies can be inspected
//! further, down to their v4 fingerprint and ECDSA public point.
//! It does not verify, decrypt or decompress anything.
//!
//! ## Reading packets
//!
//! ```
//! use pgp_framing::packet::read_packets;
//!
//! // a user id packet followed by a literal data packet split into two chunks
//! let raw = [
//!     0x8d, 0x03, b'a', b'b', b'c', // user id "abc"
//!     0xcb, 0xe1, 0x01, 0x02, // partial chunk of 2 bytes
//!     0xcb, 0x01, 0x03, // final chunk of 1 byte
//! ];
//!
//! let mut packets = Vec::new();
//! read_packets(&raw[..], |p| packets.push(p)).unwrap();
//!
//! assert_eq!(packets.len(), 2);
//! assert_eq!(&packets[1].content()[..], &[1, 2, 3]);
//! ```
//!
//! ## Fingerprints
//!
//! ```
//! use pgp_framing::types::Fingerprint;
//!
//! let fp = Fingerprint::v4(&[]).unwrap();
//! assert_eq!(fp.to_string(), "BAA8EA6AE211A3F15C17CDD5464C0428E328D538");
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, rust_2018_idioms)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
pub mod errors;

pub mod crypto;
pub mod key;
pub mod packet;
pub mod parsing_reader;
pub mod types;

pub use self::errors::{Error, Result};
pub use self::key::PublicKey;
pub use self::packet::{read_packets, Packet, PacketParser};
pub use self::types::Fingerprint;

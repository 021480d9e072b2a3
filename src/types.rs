mod fields;
mod fingerprint;
mod packet;

pub use self::{
    fields::{read_length_prefixed_field, read_point},
    fingerprint::Fingerprint,
    packet::*,
};

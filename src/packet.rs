//! # Packet module
//!
//! Splits a byte stream into packets and stitches partial bodies back together.

mod config;
mod header;
mod many;
mod raw;
mod single;

pub use self::{
    config::{ParserConfig, ParserConfigBuilder, TrailingPartial},
    header::TypeHeader,
    many::*,
    raw::Packet,
    single::read_packet,
};

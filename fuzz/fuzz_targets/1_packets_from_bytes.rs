#![no_main]

use libfuzzer_sys::fuzz_target;
use pgp_framing::packet::{read_packets_with_config, PacketParser, ParserConfig, TrailingPartial};

// split arbitrary bytes into packets
fuzz_target!(|data: &[u8]| {
    let mut total = 0;
    let res = read_packets_with_config(data, ParserConfig::default(), |p| {
        assert!(!p.is_partial());
        total += p.content().len();
    });

    // bodies can never add up to more than the input
    assert!(total <= data.len());

    // the iterator and the callback agree
    let strict = ParserConfig {
        trailing_partial: TrailingPartial::Error,
        ..Default::default()
    };
    let from_iter: Vec<_> = PacketParser::with_config(data, strict).collect();
    if res.is_err() {
        assert!(from_iter.last().is_some_and(Result::is_err));
    }
});

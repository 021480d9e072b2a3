#![no_main]

use libfuzzer_sys::fuzz_target;
use pgp_framing::PublicKey;

// decode arbitrary bytes as a public key body
fuzz_target!(|data: &[u8]| {
    if let Ok(key) = PublicKey::try_from_body(data) {
        assert_eq!(key.fingerprint().len(), 20);
    }
});

#![no_main]

use codec::{decode_config, default_config, encode_config, MAX_ENCODED_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let defaults = default_config();
    let Ok(decoded) = decode_config(data, &defaults) else {
        return;
    };
    assert!(decoded.bytes_read <= data.len());

    // Anything that decodes must re-encode within the packet bound.
    let mut buf = [0u8; MAX_ENCODED_LEN];
    let len = encode_config(&decoded.config, &defaults, &mut buf)
        .expect("decoded config re-encodes");
    assert!(decode_config(&buf[..len], &defaults).is_ok());
});

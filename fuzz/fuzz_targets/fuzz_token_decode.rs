#![no_main]

use libfuzzer_sys::fuzz_target;
use robohash_core::{decode_token, encode_token};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let _ = decode_token(text);

    // Category and part names survive encoding whatever they contain.
    let mut pieces = text.splitn(2, '\0');
    let category = pieces.next().unwrap_or_default();
    let part = pieces.next().unwrap_or_default();
    if category.is_empty() || part.is_empty() {
        return;
    }
    let decoded = decode_token(&encode_token("red", category, part)).expect("round trip");
    assert_eq!(decoded.category, category);
    assert_eq!(decoded.part, part);
});

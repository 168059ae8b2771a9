#![no_main]
use jtape::string_decode::decode_string_body;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut out = Vec::new();
    let _ = decode_string_body(data, &mut out);
});

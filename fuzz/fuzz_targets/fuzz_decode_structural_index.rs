#![no_main]
use jtape::structural::index_structurals;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = index_structurals(data);
});

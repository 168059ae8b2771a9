#![no_main]
use jtape::classify::classify_block;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut block = [b' '; 64];
    let take = data.len().min(64);
    block[..take].copy_from_slice(&data[..take]);
    let _ = classify_block(&block);
});

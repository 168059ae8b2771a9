#![no_main]
use jtape::string_scan::{scan_block, ScannerState};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut block = [b' '; 64];
    let take = data.len().min(64);
    block[..take].copy_from_slice(&data[..take]);
    let mut state = ScannerState::new();
    let _ = scan_block(&block, &mut state);
});

#![no_main]
use jtape::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut parser = Parser::new();
    let _ = parser.parse(data);
});

//! C6 — Minifier (optional alt-path).
//!
//! Strips insignificant whitespace from a JSON buffer using the same
//! classifier and string-scanner masks the structural indexer uses,
//! gathering the surviving bytes a block at a time.

use crate::block_reader::BlockReader;
use crate::classify::classify_block;
use crate::config::BLOCK_SIZE;
use crate::error::ErrorCode;
use crate::string_scan::{scan_block, ScannerState};

/// Write a whitespace-stripped copy of `buf` into `dst`, returning the
/// number of bytes written. Whitespace inside string literals is kept;
/// only whitespace outside strings is dropped.
pub fn minify(buf: &[u8], dst: &mut Vec<u8>) -> Result<usize, ErrorCode> {
    if buf.is_empty() {
        return Err(ErrorCode::Empty);
    }
    dst.clear();
    dst.reserve(buf.len());

    let mut scanner_state = ScannerState::new();

    BlockReader::new(buf).for_each_block(|base, block| {
        let classes = classify_block(block);
        let strings = scan_block(block, &mut scanner_state);

        let keep = !(classes.whitespace & !strings.in_string);
        let block_len = (buf.len() - base).min(BLOCK_SIZE);
        for i in 0..block_len {
            if (keep >> i) & 1 != 0 {
                dst.push(block[i]);
            }
        }
    });

    if scanner_state.unterminated() {
        return Err(ErrorCode::UnclosedString);
    }

    Ok(dst.len())
}

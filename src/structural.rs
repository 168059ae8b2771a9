//! C5 — Structural Indexer.
//!
//! Fuses the classifier (C2) and string scanner (C3) masks into a
//! per-block `structural_start` mask, flattens it into the growing
//! offsets array, and tracks the two error conditions only stage 1 can
//! see: unescaped control characters inside strings, and an unclosed
//! string at end of input.

use std::simd::prelude::*;

use crate::classify::classify_block;
use crate::config::BLOCK_SIZE;
use crate::error::ErrorCode;
use crate::string_scan::{scan_block, ScannerState};
use crate::utf8::validate_utf8;

/// Cross-block carry state owned by the indexer alone (distinct from the
/// string scanner's own carry state, which it holds internally).
#[derive(Debug, Clone, Copy, Default)]
struct ScalarCarry {
    prev_scalar: bool,
}

#[inline]
fn control_char_mask(block: &[u8; BLOCK_SIZE]) -> u64 {
    let v = Simd::<u8, BLOCK_SIZE>::from_slice(block);
    v.simd_le(Simd::splat(0x1Fu8)).to_bitmask()
}

#[inline]
fn extract_offsets(mut bits: u64, base: usize, out: &mut Vec<u32>) {
    while bits != 0 {
        let bit = bits.trailing_zeros();
        out.push((base + bit as usize) as u32);
        bits &= bits - 1;
    }
}

/// Run stage 1 end to end: UTF-8 validation, then the fused
/// classify/scan/flatten pass, then the two deferred string-scanner
/// errors, in priority order (UTF-8 > unescaped control > unclosed
/// string).
///
/// On success, returns the structural offsets with two trailing `len`
/// sentinels and a final `0` appended.
pub fn index_structurals(buf: &[u8]) -> Result<Vec<u32>, ErrorCode> {
    if buf.is_empty() {
        return Err(ErrorCode::Empty);
    }

    validate_utf8(buf)?;

    let mut offsets = Vec::with_capacity(buf.len() / 6 + 16);
    let mut scalar_carry = ScalarCarry::default();
    let mut scanner_state = ScannerState::new();
    let mut saw_unescaped_control = false;

    crate::block_reader::BlockReader::new(buf).for_each_block(|base, block| {
        let classes = classify_block(block);
        let strings = scan_block(block, &mut scanner_state);
        let control = control_char_mask(block);

        let scalar = !(classes.whitespace | classes.op);
        let scalar_without_quotes = scalar & !strings.quote;
        let follows_prev_scalar = (scalar_without_quotes << 1) | (scalar_carry.prev_scalar as u64);
        let potential_structural = classes.op | (scalar & !follows_prev_scalar);
        let structural_start = potential_structural & !strings.string_tail;

        let unescaped_control = control & strings.in_string & !strings.quote;
        if unescaped_control != 0 {
            saw_unescaped_control = true;
        }

        scalar_carry.prev_scalar = (scalar_without_quotes >> 63) & 1 != 0;

        extract_offsets(structural_start, base, &mut offsets);
    });

    if saw_unescaped_control {
        return Err(ErrorCode::UnescapedChars);
    }
    if scanner_state.unterminated() {
        return Err(ErrorCode::UnclosedString);
    }

    let len = buf.len() as u32;
    offsets.push(len);
    offsets.push(len);
    offsets.push(0);

    Ok(offsets)
}

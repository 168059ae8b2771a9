//! C3 — String Scanner.
//!
//! Determines, for each byte of a 64-byte block, whether it is escaped,
//! whether it is an unescaped (string-closing/opening) quote, and whether
//! it lies inside a string literal — all without scanning byte-by-byte,
//! using the branchless odd/even backslash-run trick plus a prefix-xor
//! cascade (see DESIGN.md for the grounding source), keeping the scanner
//! `unsafe`-free.

use std::simd::prelude::*;

use crate::config::BLOCK_SIZE;

const EVEN_BITS: u64 = 0x5555_5555_5555_5555;

/// Running cumulative XOR from the LSB: `out[i] = XOR(x[0..=i])`.
///
/// Portable shift-xor cascade (6 steps cover all 64 bits of a `u64`).
/// A target with a carry-less multiply instruction could compute this as
/// `clmul(x, -1i64 as u64)` in one instruction; we stick to the portable
/// form everywhere so there is exactly one code path to reason about.
#[inline]
pub fn prefix_xor(mut x: u64) -> u64 {
    x ^= x << 1;
    x ^= x << 2;
    x ^= x << 4;
    x ^= x << 8;
    x ^= x << 16;
    x ^= x << 32;
    x
}

/// Cross-block state the string scanner carries from one 64-byte block
/// to the next.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScannerState {
    /// Whether the first byte of the next block is escaped because a
    /// backslash run crossed the block boundary.
    prev_escaped: bool,
    /// All-ones if the scanner enters the next block already inside a
    /// string, all-zeros otherwise.
    prev_in_string: u64,
}

impl ScannerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if, at end of input, the scanner is still inside a string —
    /// i.e. an unclosed string.
    #[inline]
    pub fn unterminated(&self) -> bool {
        self.prev_in_string != 0
    }
}

/// Per-block output of the string scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMasks {
    pub backslash: u64,
    pub escaped: u64,
    pub quote: u64,
    pub in_string: u64,
    /// `in_string XOR quote` — true for every byte strictly between the
    /// quotes, excluding the quotes themselves.
    pub string_tail: u64,
}

#[inline]
fn splat(b: u8) -> Simd<u8, BLOCK_SIZE> {
    Simd::<u8, BLOCK_SIZE>::splat(b)
}

/// Scan one 64-byte block, updating `state` in place for the next call.
pub fn scan_block(block: &[u8; BLOCK_SIZE], state: &mut ScannerState) -> StringMasks {
    let v = Simd::<u8, BLOCK_SIZE>::from_slice(block);

    let mut backslash = v.simd_eq(splat(b'\\')).to_bitmask();
    if state.prev_escaped {
        backslash &= !1u64;
    }

    let follows_escape = (backslash << 1) | (state.prev_escaped as u64);

    let odd_starts = backslash & !EVEN_BITS & !follows_escape;

    let (sequences_starting_on_even_bits, carry) = odd_starts.overflowing_add(backslash);
    state.prev_escaped = carry;

    let invert = sequences_starting_on_even_bits << 1;
    let escaped = (EVEN_BITS ^ invert) & follows_escape;

    let quote = v.simd_eq(splat(b'"')).to_bitmask() & !escaped;

    let in_string = prefix_xor(quote) ^ state.prev_in_string;
    // sign-extend bit 63 of `in_string` into an all-ones/all-zeros mask.
    state.prev_in_string = ((in_string as i64) >> 63) as u64;

    let string_tail = in_string ^ quote;

    StringMasks {
        backslash,
        escaped,
        quote,
        in_string,
        string_tail,
    }
}

//! C2 — Character Classifier.
//!
//! Per-block SIMD classification yielding `whitespace` and `op` bitmasks
//! over a 64-byte block. One portable-SIMD kernel covers the whole block
//! in a single comparison chain rather than an AVX2/baseline/scalar
//! three-loop split (see DESIGN.md) — a 64-lane `Simd<u8, 64>` matches
//! the block width exactly, and `to_bitmask()` on a 64-lane mask yields
//! the `u64` the rest of the pipeline expects with no extra packing step.

use std::simd::prelude::*;

use crate::config::BLOCK_SIZE;

/// The classification output for one 64-byte block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockMasks {
    /// Bit *i* set iff byte *i* is one of `0x09 0x0A 0x0D 0x20`.
    pub whitespace: u64,
    /// Bit *i* set iff byte *i* is one of `{ } [ ] , :`.
    pub op: u64,
}

#[inline]
fn splat(b: u8) -> Simd<u8, BLOCK_SIZE> {
    Simd::<u8, BLOCK_SIZE>::splat(b)
}

/// Classify one full 64-byte block. `block` must contain exactly
/// [`BLOCK_SIZE`] bytes (the caller supplies a padded tail block when the
/// input doesn't divide evenly, per C1's contract).
#[inline]
pub fn classify_block(block: &[u8; BLOCK_SIZE]) -> BlockMasks {
    let v = Simd::<u8, BLOCK_SIZE>::from_slice(block);

    let whitespace = v.simd_eq(splat(b' '))
        | v.simd_eq(splat(b'\t'))
        | v.simd_eq(splat(b'\n'))
        | v.simd_eq(splat(b'\r'));

    let op = v.simd_eq(splat(b'{'))
        | v.simd_eq(splat(b'}'))
        | v.simd_eq(splat(b'['))
        | v.simd_eq(splat(b']'))
        | v.simd_eq(splat(b','))
        | v.simd_eq(splat(b':'));

    BlockMasks {
        whitespace: whitespace.to_bitmask(),
        op: op.to_bitmask(),
    }
}

/// Scalar fallback used for blocks where building a `[u8; BLOCK_SIZE]`
/// array isn't warranted (the portable tail path in `structural.rs`
/// reuses a fixed scratch array instead, but this stays available for
/// targets where `std::simd` codegen would be worse than a plain loop,
/// and for tests that want a ground truth to compare against).
#[inline]
pub fn classify_block_scalar(block: &[u8; BLOCK_SIZE]) -> BlockMasks {
    let mut whitespace = 0u64;
    let mut op = 0u64;
    for (i, &b) in block.iter().enumerate() {
        match b {
            b' ' | b'\t' | b'\n' | b'\r' => whitespace |= 1 << i,
            b'{' | b'}' | b'[' | b']' | b',' | b':' => op |= 1 << i,
            _ => {}
        }
    }
    BlockMasks { whitespace, op }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_from(s: &[u8]) -> [u8; BLOCK_SIZE] {
        let mut b = [b' '; BLOCK_SIZE];
        b[..s.len()].copy_from_slice(s);
        b
    }

    #[test]
    fn classifies_whitespace_and_ops() {
        let block = block_from(b"{\"a\": [1, 2]}\t\n");
        let masks = classify_block(&block);
        assert_eq!(masks.op & 1, 1); // '{' at position 0
        assert!(masks.whitespace & (1 << 4) != 0); // space after ':'
    }

    #[test]
    fn simd_and_scalar_agree() {
        let samples: &[&[u8]] = &[
            b"",
            b"   ",
            b"{}[],:",
            b"\"hello world\" 123 true false null",
        ];
        for s in samples {
            let block = block_from(s);
            assert_eq!(classify_block(&block).whitespace, classify_block_scalar(&block).whitespace);
            assert_eq!(classify_block(&block).op, classify_block_scalar(&block).op);
        }
    }
}

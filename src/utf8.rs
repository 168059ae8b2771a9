//! C4 — UTF-8 Validator.
//!
//! Delegates to `simdutf8` rather than a hand-rolled nibble-lookup
//! validator (see DESIGN.md).

use crate::error::ErrorCode;

/// Validate that `buf` is well-formed UTF-8, without allocating.
///
/// This is the standalone entrypoint, separate from string-literal
/// validation: it covers the whole input buffer, used by callers that
/// want to reject invalid UTF-8 before structural indexing even starts
/// (see `Parser::parse`).
pub fn validate_utf8(buf: &[u8]) -> Result<(), ErrorCode> {
    simdutf8::basic::from_utf8(buf)
        .map(|_| ())
        .map_err(|_| ErrorCode::Utf8Error)
}

/// Validate and borrow a string slice from the tape's string side-buffer
/// or a raw literal span. Returns the error case `simdutf8`'s `compat`
/// API gives so callers that need the exact invalid byte index (rather
/// than a bare reject) can use it; the fast boolean-only path above is
/// what structural indexing uses on the hot path.
pub fn validate_utf8_with_position(buf: &[u8]) -> Result<&str, ErrorCode> {
    simdutf8::compat::from_utf8(buf).map_err(|_| ErrorCode::Utf8Error)
}

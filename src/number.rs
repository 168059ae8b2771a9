//! C8 — Number Parser.
//!
//! Grammar parsing and the SWAR 8-digit fast path handle recognition;
//! the exact-rounding float path is delegated to `lexical-core` rather
//! than hand-rolled (see DESIGN.md).

use crate::error::ErrorCode;

/// A parsed JSON numeral, in the narrowest of the three tape-representable
/// forms that exactly holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int64(i64),
    Uint64(u64),
    Double(f64),
}

#[inline]
fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// SWAR check: do all 8 bytes of `chunk` represent ASCII digits?
/// `((v & 0xF0…) | (((v + 0x06…) & 0xF0…) >> 4)) == 0x3333…33`; `v` here
/// is read as a little-endian `u64` of the chunk.
#[inline]
fn eight_digits_fast(chunk: [u8; 8]) -> Option<u64> {
    let v = u64::from_le_bytes(chunk);
    let has_nondigit = ((v & 0xF0F0_F0F0_F0F0_F0F0)
        | (((v.wrapping_add(0x0606_0606_0606_0606)) & 0xF0F0_F0F0_F0F0_F0F0) >> 4))
        != 0x3333_3333_3333_3333;
    if has_nondigit {
        return None;
    }
    let mut value: u64 = 0;
    for i in 0..8 {
        value = value * 10 + (chunk[i] - b'0') as u64;
    }
    Some(value)
}

struct Scan<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Scan<'a> {
    fn peek(&self) -> u8 {
        self.buf[self.pos]
    }

    fn bump(&mut self) -> u8 {
        let b = self.buf[self.pos];
        self.pos += 1;
        b
    }

    /// Advance over runs of 8 ASCII digits at a time using the SWAR
    /// check, falling back to one-at-a-time for the remainder. The
    /// digits themselves are re-parsed from the text slice afterwards
    /// via `lexical-core`; this only accelerates grammar recognition.
    fn skip_digits_fast(&mut self) {
        while self.pos + 8 <= self.buf.len() {
            let chunk: [u8; 8] = self.buf[self.pos..self.pos + 8].try_into().unwrap();
            if eight_digits_fast(chunk).is_none() {
                break;
            }
            self.pos += 8;
        }
        while self.pos < self.buf.len() && is_digit(self.peek()) {
            self.bump();
        }
    }
}

/// Parse a JSON numeral starting at `buf[0]`. `buf` must be followed (at
/// some position within its own bounds or the caller's padding) by a
/// structural or whitespace byte — i.e. the grammar is free to read one
/// byte past the last digit to find the terminator, which the padding
/// contract guarantees is always safe to do.
pub fn parse_number(buf: &[u8]) -> Result<(Number, usize), ErrorCode> {
    let mut s = Scan { buf, pos: 0 };
    if s.buf.is_empty() {
        return Err(ErrorCode::NumberError);
    }

    let negative = s.peek() == b'-';
    if negative {
        s.bump();
        if s.pos >= s.buf.len() || !is_digit(s.peek()) {
            return Err(ErrorCode::NumberError);
        }
    }

    let int_start = s.pos;
    if s.peek() == b'0' {
        s.bump();
    } else if is_digit(s.peek()) {
        s.skip_digits_fast();
    } else {
        return Err(ErrorCode::NumberError);
    }
    let int_end = s.pos;
    let int_digit_count = int_end - int_start;

    let mut is_float = false;

    if s.pos < s.buf.len() && s.peek() == b'.' {
        is_float = true;
        s.bump();
        let frac_start = s.pos;
        while s.pos < s.buf.len() && is_digit(s.peek()) {
            s.bump();
        }
        if s.pos == frac_start {
            return Err(ErrorCode::NumberError);
        }
    }

    if s.pos < s.buf.len() && (s.peek() == b'e' || s.peek() == b'E') {
        is_float = true;
        s.bump();
        if s.pos < s.buf.len() && (s.peek() == b'+' || s.peek() == b'-') {
            s.bump();
        }
        let exp_start = s.pos;
        while s.pos < s.buf.len() && is_digit(s.peek()) {
            s.bump();
        }
        if s.pos == exp_start {
            return Err(ErrorCode::NumberError);
        }
    }

    let consumed = s.pos;
    if consumed < s.buf.len() {
        let terminator = s.buf[consumed];
        let ok = terminator.is_ascii_whitespace()
            || matches!(terminator, b',' | b'}' | b']' | b':');
        if !ok {
            return Err(ErrorCode::NumberError);
        }
    }

    let text = &buf[..consumed];

    if !is_float {
        return Ok((parse_integer(text, negative, int_digit_count)?, consumed));
    }

    let parsed: f64 = lexical_core::parse(text)
        .map_err(|_| ErrorCode::NumberError)?;
    if !parsed.is_finite() {
        return Err(ErrorCode::NumberError);
    }
    Ok((Number::Double(parsed), consumed))
}

/// Integer-only path; enforces the overflow rules for 19/20-digit runs.
fn parse_integer(text: &[u8], negative: bool, digit_count: usize) -> Result<Number, ErrorCode> {
    if negative {
        if digit_count > 19 {
            return Err(ErrorCode::NumberError);
        }
        let value: i64 = lexical_core::parse(text).map_err(|_| ErrorCode::NumberError)?;
        return Ok(Number::Int64(value));
    }

    if digit_count > 20 {
        return Err(ErrorCode::NumberError);
    }
    if digit_count == 20 && text[0] != b'1' {
        return Err(ErrorCode::NumberError);
    }

    if let Ok(v) = lexical_core::parse::<i64, _>(text) {
        return Ok(Number::Int64(v));
    }
    let v: u64 = lexical_core::parse(text).map_err(|_| ErrorCode::NumberError)?;
    Ok(Number::Uint64(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Number {
        // Pad so the grammar's "peek terminator" never reads out of
        // bounds, matching the padding contract real input buffers carry.
        let mut padded = s.as_bytes().to_vec();
        padded.extend_from_slice(b"        ");
        parse_number(&padded).unwrap().0
    }

    #[test]
    fn parses_small_integers() {
        assert_eq!(parse("0"), Number::Int64(0));
        assert_eq!(parse("42"), Number::Int64(42));
        assert_eq!(parse("-7"), Number::Int64(-7));
    }

    #[test]
    fn parses_u64_max_boundary() {
        assert_eq!(parse("18446744073709551615"), Number::Uint64(u64::MAX));
    }

    #[test]
    fn rejects_u64_max_plus_one() {
        let mut padded = b"18446744073709551616".to_vec();
        padded.extend_from_slice(b"        ");
        assert_eq!(parse_number(&padded), Err(ErrorCode::NumberError));
    }

    #[test]
    fn parses_i64_min_boundary() {
        assert_eq!(parse("-9223372036854775808"), Number::Int64(i64::MIN));
    }

    #[test]
    fn nine_digit_twenty_wraps_to_u64() {
        assert_eq!(parse("9223372036854775808"), Number::Uint64(9223372036854775808));
    }

    #[test]
    fn parses_floats_and_exponents() {
        assert_eq!(parse("1.5"), Number::Double(1.5));
        match parse("-0.0e+2") {
            Number::Double(d) => {
                assert!(d == 0.0 && d.is_sign_negative());
            }
            other => panic!("expected double, got {other:?}"),
        }
    }

    #[test]
    fn rejects_leading_plus() {
        let mut padded = b"+1".to_vec();
        padded.extend_from_slice(b"        ");
        assert_eq!(parse_number(&padded), Err(ErrorCode::NumberError));
    }

    #[test]
    fn rejects_leading_zero_followed_by_digit() {
        // "0" alone is a complete number; a digit immediately after it
        // with no terminator in between isn't a valid continuation, so
        // the whole thing is rejected rather than yielding "0" + "1".
        let mut padded = b"01".to_vec();
        padded.extend_from_slice(b"        ");
        assert_eq!(parse_number(&padded), Err(ErrorCode::NumberError));
    }

    #[test]
    fn eight_digit_swar_detects_all_digit_chunks() {
        assert_eq!(eight_digits_fast(*b"12345678"), Some(12345678));
        assert_eq!(eight_digits_fast(*b"1234567x"), None);
    }
}

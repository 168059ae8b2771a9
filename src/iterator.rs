//! C7 — Stage-2 Iterator.
//!
//! Walks the structural offset array produced by stage 1, driving a
//! [`Visitor`] through recursive descent instead of an explicit state
//! enum — Rust has no zero-cost way to inline a visitor the way C++
//! templates do, so control flow and tape building are kept as two
//! separate, ordinary functions calling each other (see DESIGN.md).

use crate::error::ErrorCode;
use crate::visitor::Visitor;

pub struct Iterator<'a, V: Visitor> {
    buf: &'a [u8],
    /// Length of the original, unpadded content `buf` was built from.
    /// `buf` itself stays padded so number/string lookahead can safely
    /// read past the last structural byte.
    len: usize,
    offsets: &'a [u32],
    idx: usize,
    depth: usize,
    max_depth: usize,
    visitor: &'a mut V,
}

impl<'a, V: Visitor> Iterator<'a, V> {
    pub fn new(
        buf: &'a [u8],
        len: usize,
        offsets: &'a [u32],
        max_depth: usize,
        visitor: &'a mut V,
    ) -> Self {
        Self {
            buf,
            len,
            offsets,
            idx: 0,
            depth: 0,
            max_depth,
            visitor,
        }
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offsets[self.idx] as usize
    }

    #[inline]
    fn peek(&self) -> u8 {
        self.buf[self.offset()]
    }

    #[inline]
    fn bump_offset(&mut self) -> usize {
        let o = self.offset();
        self.idx += 1;
        o
    }

    fn expect_literal(&self, off: usize, lit: &[u8], err: ErrorCode) -> Result<(), ErrorCode> {
        if self.buf.len() < off + lit.len() || &self.buf[off..off + lit.len()] != lit {
            return Err(err);
        }
        Ok(())
    }

    /// Drive the full document: `document_start` through `document_end`.
    pub fn run(&mut self) -> Result<(), ErrorCode> {
        self.visitor.visit_document_start()?;

        match self.peek() {
            b'{' => self.parse_object()?,
            b'[' => self.parse_array()?,
            _ => self.parse_root_primitive()?,
        }

        // Non-streaming mode requires no trailing structural tokens
        // other than the sentinel pair appended in stage 1. The sentinel
        // holds the original content length, not the padded buffer's.
        if self.offset() != self.len {
            return Err(ErrorCode::TapeError);
        }

        self.visitor.visit_document_end()
    }

    fn parse_root_primitive(&mut self) -> Result<(), ErrorCode> {
        match self.peek() {
            b'"' => {
                let off = self.bump_offset();
                self.visitor.visit_root_string(&self.buf[off + 1..])?;
            }
            b't' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"true", ErrorCode::TAtomError)?;
                self.visitor.visit_root_true()?;
            }
            b'f' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"false", ErrorCode::FAtomError)?;
                self.visitor.visit_root_false()?;
            }
            b'n' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"null", ErrorCode::NAtomError)?;
                self.visitor.visit_root_null()?;
            }
            b'-' | b'0'..=b'9' => {
                let off = self.bump_offset();
                self.visitor.visit_root_number(&self.buf[off..])?;
            }
            _ => return Err(ErrorCode::TapeError),
        }
        Ok(())
    }

    fn parse_value(&mut self) -> Result<(), ErrorCode> {
        match self.peek() {
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b'"' => {
                let off = self.bump_offset();
                self.visitor.visit_string(&self.buf[off + 1..])?;
                Ok(())
            }
            b't' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"true", ErrorCode::TAtomError)?;
                self.visitor.visit_true()
            }
            b'f' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"false", ErrorCode::FAtomError)?;
                self.visitor.visit_false()
            }
            b'n' => {
                let off = self.bump_offset();
                self.expect_literal(off, b"null", ErrorCode::NAtomError)?;
                self.visitor.visit_null()
            }
            b'-' | b'0'..=b'9' => {
                let off = self.bump_offset();
                self.visitor.visit_number(&self.buf[off..])?;
                Ok(())
            }
            _ => Err(ErrorCode::TapeError),
        }
    }

    fn enter(&mut self) -> Result<(), ErrorCode> {
        if self.depth >= self.max_depth {
            return Err(ErrorCode::DepthError);
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_object(&mut self) -> Result<(), ErrorCode> {
        self.bump_offset(); // '{'
        if self.peek() == b'}' {
            self.bump_offset();
            return self.visitor.visit_empty_object();
        }
        self.enter()?;
        self.visitor.visit_object_start()?;
        loop {
            if self.peek() != b'"' {
                return Err(ErrorCode::TapeError);
            }
            let key_off = self.bump_offset();
            self.visitor.visit_key(&self.buf[key_off + 1..])?;

            if self.peek() != b':' {
                return Err(ErrorCode::TapeError);
            }
            self.bump_offset();

            self.parse_value()?;
            self.visitor.increment_count(self.depth);

            match self.peek() {
                b',' => {
                    self.bump_offset();
                    continue;
                }
                b'}' => {
                    self.bump_offset();
                    self.depth -= 1;
                    return self.visitor.visit_object_end();
                }
                _ => return Err(ErrorCode::TapeError),
            }
        }
    }

    fn parse_array(&mut self) -> Result<(), ErrorCode> {
        self.bump_offset(); // '['
        if self.peek() == b']' {
            self.bump_offset();
            return self.visitor.visit_empty_array();
        }
        self.enter()?;
        self.visitor.visit_array_start()?;
        loop {
            self.parse_value()?;
            self.visitor.increment_count(self.depth);

            match self.peek() {
                b',' => {
                    self.bump_offset();
                    continue;
                }
                b']' => {
                    self.bump_offset();
                    self.depth -= 1;
                    return self.visitor.visit_array_end();
                }
                _ => return Err(ErrorCode::TapeError),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TapeBuilder;
    use crate::structural::index_structurals;
    use crate::tape;

    fn run(input: &[u8]) -> Result<TapeBuilder, ErrorCode> {
        // Pad like `Parser::parse` would.
        let mut padded = input.to_vec();
        padded.extend_from_slice(&[b' '; 64]);
        let offsets = index_structurals(&padded[..input.len()])?;
        let mut builder = TapeBuilder::new(1024);
        let mut it = Iterator::new(&padded, input.len(), &offsets, 1024, &mut builder);
        it.run()?;
        Ok(builder)
    }

    #[test]
    fn parses_flat_object() {
        let b = run(br#"{"a":1,"b":true}"#).unwrap();
        let tags: Vec<u8> = b.tape().iter().map(|&w| tape::tag_of(w)).collect();
        assert_eq!(tags[0], b'r');
        assert_eq!(tags[1], b'{');
        assert_eq!(*tags.last().unwrap(), b'r');
    }

    #[test]
    fn parses_empty_containers() {
        let b = run(b"[]").unwrap();
        let tags: Vec<u8> = b.tape().iter().map(|&w| tape::tag_of(w)).collect();
        assert_eq!(tags, vec![b'r', b'[', b']', b'r']);

        let b = run(b"{}").unwrap();
        let tags: Vec<u8> = b.tape().iter().map(|&w| tape::tag_of(w)).collect();
        assert_eq!(tags, vec![b'r', b'{', b'}', b'r']);
    }

    #[test]
    fn bare_null_at_root() {
        let b = run(b"null").unwrap();
        let tags: Vec<u8> = b.tape().iter().map(|&w| tape::tag_of(w)).collect();
        assert_eq!(tags, vec![b'r', b'n', b'r']);
    }

    #[test]
    fn missing_comma_in_array_is_tape_error() {
        assert_eq!(run(b"[1 2]"), Err(ErrorCode::TapeError));
    }

    #[test]
    fn missing_value_after_colon_is_tape_error() {
        assert_eq!(run(b"{\"k\":}"), Err(ErrorCode::TapeError));
    }

    #[test]
    fn truncated_object_is_tape_error() {
        assert_eq!(run(b"{\"a\":1"), Err(ErrorCode::TapeError));
    }

    #[test]
    fn nested_structure_matches_expected_tag_sequence() {
        let b = run(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
        let tape = b.tape();
        // Int64/Double/Uint64 each occupy a tag word plus a raw-value
        // word, so walk manually instead of mapping every word to a tag.
        let mut tags = Vec::new();
        let mut i = 0;
        while i < tape.len() {
            let tag = tape::tag_of(tape[i]);
            tags.push(tag);
            i += if tag == b'l' || tag == b'u' || tag == b'd' { 2 } else { 1 };
        }
        assert_eq!(
            tags,
            vec![b'r', b'{', b'"', b'l', b'"', b'[', b't', b'n', b'"', b']', b'}', b'r']
        );
        // outer object has 2 keys, inner array has 3 elements.
        assert_eq!(tape::container_count(tape::payload_of(tape[1])), 2);
        let array_start_idx = tags_index(&tape, b'[');
        assert_eq!(tape::container_count(tape::payload_of(tape[array_start_idx])), 3);
    }

    fn tags_index(tape: &[tape::Word], tag: u8) -> usize {
        tape.iter().position(|&w| tape::tag_of(w) == tag).unwrap()
    }
}

//! Top-level `Parser`: owns the reusable buffers (structural-index array,
//! tape, string buffer, container stack) and ties the pipeline together.
//! One long-lived parser instance is meant to be run across many
//! documents without reallocating.

use crate::builder::TapeBuilder;
use crate::config::{ParserConfig, DEFAULT_MAX_DEPTH, PADDING};
use crate::error::ErrorCode;
use crate::iterator::Iterator as TokenIterator;
use crate::structural::index_structurals;
use crate::tape::Tape;

pub struct Parser {
    config: ParserConfig,
    /// Owned scratch buffer used by the safe [`Parser::parse`] entrypoint
    /// to hand `parse_padded` a buffer that always satisfies its
    /// padding contract, regardless of what the caller supplied.
    scratch: Vec<u8>,
    offsets: Vec<u32>,
    builder: TapeBuilder,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            scratch: Vec::new(),
            offsets: Vec::new(),
            builder: TapeBuilder::new(config.max_depth),
        }
    }

    /// Grow the parser's owned buffers to handle documents up to
    /// `capacity` bytes without reallocating mid-parse. Monotonic: never
    /// shrinks existing capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), ErrorCode> {
        if capacity >= (1usize << 32) {
            return Err(ErrorCode::Capacity);
        }
        self.config.capacity = capacity.max(self.config.capacity);
        let needed = self.config.capacity + PADDING;
        if self.scratch.capacity() < needed {
            self.scratch.try_reserve(needed - self.scratch.len()).map_err(|_| ErrorCode::MemAlloc)?;
        }
        Ok(())
    }

    /// Change the maximum container nesting depth the parser accepts.
    /// Rebuilds the (small, depth-sized) container stack; tape and
    /// string-buffer storage are untouched.
    pub fn set_max_depth(&mut self, max_depth: usize) -> Result<(), ErrorCode> {
        self.config.max_depth = max_depth;
        self.builder = TapeBuilder::new(max_depth);
        Ok(())
    }

    pub fn max_depth(&self) -> usize {
        self.config.max_depth
    }

    /// Parse `input`, copying it into an owned, padded scratch buffer
    /// first. Always safe regardless of what padding `input` itself
    /// carries.
    pub fn parse(&mut self, input: &[u8]) -> Result<Tape<'_>, ErrorCode> {
        if input.is_empty() {
            return Err(ErrorCode::Empty);
        }
        let needed = input.len() + PADDING;
        self.scratch.clear();
        self.scratch.extend_from_slice(input);
        self.scratch.resize(needed, b' ');
        self.run(input.len())
    }

    /// Zero-copy entrypoint. `buf.len()` must be at least `len + PADDING`;
    /// violating this is a caller programming error and panics rather
    /// than risking undefined behavior, since every downstream read
    /// assumes the padding is really there.
    pub fn parse_padded(&mut self, buf: &[u8], len: usize) -> Result<Tape<'_>, ErrorCode> {
        assert!(
            buf.len() >= len + PADDING,
            "parse_padded requires at least {PADDING} bytes of padding past `len`"
        );
        if len == 0 {
            return Err(ErrorCode::Empty);
        }
        self.scratch.clear();
        self.scratch.extend_from_slice(&buf[..len + PADDING]);
        self.run(len)
    }

    fn run(&mut self, len: usize) -> Result<Tape<'_>, ErrorCode> {
        let offsets = index_structurals(&self.scratch[..len])?;
        self.offsets = offsets;

        self.builder.reset();
        {
            let mut it = TokenIterator::new(
                &self.scratch,
                len,
                &self.offsets,
                self.config.max_depth,
                &mut self.builder,
            );
            it.run()?;
        }

        Ok(Tape::new(self.builder.tape(), self.builder.string_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_document() {
        let mut p = Parser::new();
        let tape = p.parse(br#"{"a":1,"b":[true,null,"x"]}"#).unwrap();
        assert!(!tape.is_empty());
    }

    #[test]
    fn rejects_empty_input() {
        let mut p = Parser::new();
        assert_eq!(p.parse(b""), Err(ErrorCode::Empty));
    }

    #[test]
    fn reuses_buffers_across_parses() {
        let mut p = Parser::new();
        p.parse(br#"[1,2,3]"#).unwrap();
        let tape = p.parse(br#"{"k":"v"}"#).unwrap();
        assert!(!tape.is_empty());
    }

    #[test]
    fn default_max_depth_matches_config_default() {
        let p = Parser::new();
        assert_eq!(p.max_depth(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn parse_padded_rejects_insufficient_padding() {
        let mut p = Parser::new();
        let buf = b"{}".to_vec();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            p.parse_padded(&buf, buf.len())
        }));
        assert!(result.is_err());
    }

    #[test]
    fn parse_padded_accepts_correctly_padded_buffer() {
        let mut p = Parser::new();
        let mut buf = b"{}".to_vec();
        buf.resize(2 + PADDING, b' ');
        let tape = p.parse_padded(&buf, 2).unwrap();
        assert!(!tape.is_empty());
    }

    #[test]
    fn deeply_nested_arrays_within_default_depth_parse_successfully() {
        let mut p = Parser::new();
        let depth = 500;
        let mut doc = "[".repeat(depth);
        doc.push('0');
        doc.push_str(&"]".repeat(depth));
        let tape = p.parse(doc.as_bytes()).unwrap();
        assert!(!tape.is_empty());
    }

    #[test]
    fn nesting_beyond_max_depth_is_rejected() {
        let mut p = Parser::new();
        p.set_max_depth(8).unwrap();
        let depth = 9;
        let mut doc = "[".repeat(depth);
        doc.push('0');
        doc.push_str(&"]".repeat(depth));
        assert_eq!(p.parse(doc.as_bytes()), Err(ErrorCode::DepthError));
    }

    #[test]
    fn minify_then_parse_yields_same_tape_shape_as_parsing_directly() {
        let pretty = br#"{
            "a": 1,
            "b": [true, false, null, "x"]
        }"#;
        let mut minified = Vec::new();
        crate::minifier::minify(pretty, &mut minified).unwrap();

        let mut p1 = Parser::new();
        let direct_tape = p1.parse(pretty).unwrap();
        let mut p2 = Parser::new();
        let minified_tape = p2.parse(&minified).unwrap();

        assert_eq!(direct_tape.len(), minified_tape.len());
    }
}

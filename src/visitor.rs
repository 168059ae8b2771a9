//! C10 — Visitor Interface.
//!
//! The callback contract between the stage-2 iterator (`iterator.rs`)
//! and whatever consumes its events (`builder.rs`'s `TapeBuilder`, the
//! only implementation this crate ships) — kept as a trait so
//! `iterator.rs`'s control flow doesn't need to know anything about
//! tape words.

use crate::error::ErrorCode;
use crate::number::Number;

/// Events the stage-2 iterator emits, strictly in the order the grammar
/// dictates. Every method returns `Ok(())` on success; an `Err` aborts
/// the iterator immediately.
pub trait Visitor {
    fn visit_document_start(&mut self) -> Result<(), ErrorCode>;
    fn visit_document_end(&mut self) -> Result<(), ErrorCode>;

    fn visit_object_start(&mut self) -> Result<(), ErrorCode>;
    fn visit_object_end(&mut self) -> Result<(), ErrorCode>;
    fn visit_empty_object(&mut self) -> Result<(), ErrorCode>;

    fn visit_array_start(&mut self) -> Result<(), ErrorCode>;
    fn visit_array_end(&mut self) -> Result<(), ErrorCode>;
    fn visit_empty_array(&mut self) -> Result<(), ErrorCode>;

    /// `key_src` points at the byte past the opening quote; the decoder
    /// scans forward to find the closing quote itself.
    fn visit_key(&mut self, key_src: &[u8]) -> Result<usize, ErrorCode>;

    fn visit_string(&mut self, str_src: &[u8]) -> Result<usize, ErrorCode>;
    fn visit_number(&mut self, num_src: &[u8]) -> Result<usize, ErrorCode>;
    fn visit_true(&mut self) -> Result<(), ErrorCode>;
    fn visit_false(&mut self) -> Result<(), ErrorCode>;
    fn visit_null(&mut self) -> Result<(), ErrorCode>;

    /// A bare scalar at the document root, e.g. input `null` or `42`.
    fn visit_root_number(&mut self, num_src: &[u8]) -> Result<usize, ErrorCode>;
    fn visit_root_string(&mut self, str_src: &[u8]) -> Result<usize, ErrorCode>;
    fn visit_root_true(&mut self) -> Result<(), ErrorCode>;
    fn visit_root_false(&mut self) -> Result<(), ErrorCode>;
    fn visit_root_null(&mut self) -> Result<(), ErrorCode>;

    fn increment_count(&mut self, depth: usize);
}

/// Convenience re-export so `builder.rs` can construct tape number words
/// directly from a parsed [`Number`] without importing `number` itself.
pub type VisitedNumber = Number;

#![cfg_attr(docsrs, feature(doc_cfg))]
#![feature(portable_simd)]

//! A two-stage, SIMD-oriented JSON parser (RFC 8259) that produces a
//! compact tape representation instead of an allocated document tree.
//!
//! Stage 1 ([`structural`]) walks the input in 64-byte blocks, fusing a
//! character classifier ([`classify`]), a backslash/quote bit-parallel
//! string scanner ([`string_scan`]), and a UTF-8 validator ([`utf8`])
//! into a single pass that produces an array of structural byte offsets.
//! Stage 2 ([`iterator`]) walks that offset array, validating JSON
//! grammar and driving a [`visitor::Visitor`] — [`builder::TapeBuilder`]
//! in this crate — that decodes numbers ([`number`]) and strings
//! ([`string_decode`]) and writes the result to a [`tape::Tape`].
//!
//! [`Parser`] ties the pipeline together and owns the buffers every
//! stage reuses across documents.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod block_reader;
pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod iterator;
pub mod minifier;
pub mod number;
pub mod parser;
pub mod string_decode;
pub mod string_scan;
pub mod structural;
pub mod tape;
pub mod utf8;
pub mod visitor;

pub use config::ParserConfig;
pub use error::{ErrorCode, Result};
pub use minifier::minify;
pub use number::Number;
pub use parser::Parser;
pub use tape::Tape;
pub use utf8::validate_utf8;
pub use visitor::Visitor;

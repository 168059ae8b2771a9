use thiserror::Error;

/// Every outcome a parse (or a standalone entrypoint) can report.
///
/// These are returned as values, never raised as panics or exceptions —
/// a parse either completes and returns a `Tape`, or returns one of these.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("capacity exceeded")]
    Capacity,
    #[error("memory allocation failed")]
    MemAlloc,
    #[error("tape error: unexpected token")]
    TapeError,
    #[error("maximum nesting depth exceeded")]
    DepthError,
    #[error("invalid string")]
    StringError,
    #[error("invalid literal, expected 'true'")]
    TAtomError,
    #[error("invalid literal, expected 'false'")]
    FAtomError,
    #[error("invalid literal, expected 'null'")]
    NAtomError,
    #[error("invalid number")]
    NumberError,
    #[error("invalid UTF-8")]
    Utf8Error,
    #[error("parser not initialized")]
    Uninitialized,
    #[error("empty input")]
    Empty,
    #[error("unescaped control character in string")]
    UnescapedChars,
    #[error("unclosed string")]
    UnclosedString,
    #[error("unsupported architecture")]
    UnsupportedArchitecture,
    #[error("value has an incorrect type for this access")]
    IncorrectType,
    #[error("number is out of representable range")]
    NumberOutOfRange,
    #[error("index out of bounds")]
    IndexOutOfBounds,
    #[error("no such field")]
    NoSuchField,
    #[error("I/O error")]
    IoError,
    #[error("invalid JSON pointer")]
    InvalidJsonPointer,
    #[error("invalid URI fragment")]
    InvalidUriFragment,
    #[error("unexpected internal error")]
    UnexpectedError,
}

pub type Result<T> = std::result::Result<T, ErrorCode>;

//! Error types for reading and decoding

use std::fmt;

use thiserror::Error;

use crate::symbol::Symbol;

/// A source position (1-based line and column) for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based line number
    pub line: usize,

    /// 1-based column number
    pub column: usize,
}

impl Position {
    /// Create a position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors raised while parsing notation text into values.
///
/// Every variant carries the position where parsing failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// Input ended in the middle of a form
    #[error("unexpected end of input at {pos}")]
    UnexpectedEof {
        /// Where input ran out
        pos: Position,
    },

    /// A character that cannot start or continue the current form
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Where it was found
        pos: Position,
    },

    /// A closing delimiter with no matching opener
    #[error("unmatched delimiter '{delim}' at {pos}")]
    UnmatchedDelimiter {
        /// The stray delimiter
        delim: char,
        /// Where it was found
        pos: Position,
    },

    /// A token that looks numeric but does not parse as a number
    #[error("invalid number literal '{text}' at {pos}")]
    BadNumber {
        /// The token as scanned
        text: String,
        /// Where the token starts
        pos: Position,
    },

    /// An unsupported escape sequence inside a string literal
    #[error("unsupported escape '\\{ch}' at {pos}")]
    BadEscape {
        /// The character following the backslash
        ch: char,
        /// Where the escape starts
        pos: Position,
    },

    /// A character literal that names no known character
    #[error("invalid character literal '\\{text}' at {pos}")]
    BadChar {
        /// The token following the backslash
        text: String,
        /// Where the literal starts
        pos: Position,
    },

    /// A token that violates symbol lexical rules
    #[error("invalid symbol '{text}' at {pos}")]
    BadSymbol {
        /// The token as scanned
        text: String,
        /// Where the token starts
        pos: Position,
    },

    /// A map literal with a key but no value
    #[error("map literal has a key with no value at {pos}")]
    DanglingKey {
        /// Where the map closes
        pos: Position,
    },

    /// The same key appearing twice in a map or set literal
    #[error("duplicate key in map or set literal at {pos}")]
    DuplicateKey {
        /// Where the repeated key starts
        pos: Position,
    },

    /// Leftover non-whitespace input after a complete form
    #[error("trailing input after form at {pos}")]
    TrailingInput {
        /// Where the leftover input starts
        pos: Position,
    },
}

/// Errors raised while resolving tagged values through a registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A tag with no registered constructor and no fallback
    #[error("no constructor registered for tag '{tag}'")]
    UnknownTag {
        /// The unresolvable tag
        tag: Symbol,
    },

    /// A constructor rejected the decoded payload
    #[error("constructor for tag '{tag}' rejected payload: {reason}")]
    Constructor {
        /// The tag whose constructor failed
        tag: Symbol,
        /// Why the payload was rejected
        reason: String,
    },
}

/// Top-level error type covering both reading and tag resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input text did not parse
    #[error(transparent)]
    Read(#[from] ReadError),

    /// The parsed value could not be resolved
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type alias for mallorn operations
pub type Result<T> = std::result::Result<T, Error>;

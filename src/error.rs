//! Error types for reading and evaluating s-expressions.
//!
//! Every failure is a closed enum so host code can branch on the kind
//! instead of matching message text.

use std::fmt;

use thiserror::Error;

use crate::value::{Symbol, Value, ValueKind};

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

// ============================================================================
// Reader Errors
// ============================================================================

/// Categories of reader failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ReadErrorKind {
    /// A string was opened but never closed, or ended in a lone backslash
    #[error("missing quote character")]
    UnterminatedString,
    /// Input ended inside an open list
    #[error("missing closing parenthesis")]
    MissingCloseParen,
    /// A closing parenthesis without a matching open one
    #[error("missing opening parenthesis")]
    MissingOpenParen,
    /// Strict reads only: content after the first complete expression
    #[error("missing end of input")]
    TrailingContent,
    /// Strict reads only: the input holds nothing but whitespace and comments
    #[error("no expression in input")]
    NoExpression,
}

/// A reader failure together with the character offset where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (offset {offset})")]
pub struct ReadError {
    pub kind: ReadErrorKind,
    pub offset: usize,
}

impl ReadError {
    pub fn new(kind: ReadErrorKind, offset: usize) -> Self {
        ReadError { kind, offset }
    }

    pub fn kind(&self) -> ReadErrorKind {
        self.kind
    }
}

// ============================================================================
// Evaluation Errors
// ============================================================================

/// Direction of an arity violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArityViolation {
    TooFew,
    TooMany,
}

impl fmt::Display for ArityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArityViolation::TooFew => write!(f, "not enough"),
            ArityViolation::TooMany => write!(f, "too many"),
        }
    }
}

/// Errors raised by the evaluator, by form calls and by argument accessors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("unbound form symbol {symbol}")]
    UnboundForm { symbol: Symbol },

    #[error("symbol {symbol} is bound to {value}, which is not a form")]
    NotAForm { symbol: Symbol, value: Value },

    /// `limit` is the minimum arity for `TooFew` and the maximum for `TooMany`.
    #[error("{violation} arguments ({got}) for form {form} ({limit})")]
    Arity {
        form: String,
        violation: ArityViolation,
        got: usize,
        limit: usize,
    },

    /// Opaque failure raised by a host function body, passed through verbatim.
    #[error("{0}")]
    Host(String),

    #[error("{value} / {index} is not a {expected}")]
    WrongType {
        expected: ValueKind,
        index: usize,
        value: Value,
    },

    #[error("index {index} out of bounds for {len} arguments")]
    IndexOutOfBounds { index: usize, len: usize },
}

impl Error {
    /// Create a host error from any message.
    pub fn host(message: impl Into<String>) -> Self {
        Error::Host(message.into())
    }

    /// True for either direction of arity violation.
    pub fn is_arity(&self) -> bool {
        matches!(self, Error::Arity { .. })
    }
}

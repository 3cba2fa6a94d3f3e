use alloc::string::String;

use thiserror::Error;

use crate::{
    parser::{Context, Expected},
    token::TokenKind,
    validator::Position,
};

/// The first error found in a document, with the place it was found.
///
/// For lexical errors the position is that of the offending character. For
/// syntax errors it is the character whose processing completed the offending
/// token, and `token_index` is the zero-based index of that token. Errors at
/// end of input point just past the last character.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at {line}:{column}")]
pub struct ValidationError {
    pub(crate) kind: ErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub token_index: Option<usize>,
}

impl ValidationError {
    pub(crate) fn new(kind: ErrorKind, at: Position, token_index: Option<usize>) -> Self {
        Self {
            kind,
            offset: at.offset,
            line: at.line,
            column: at.column,
            token_index,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("unexpected end of input, expected {expected}")]
    IncompleteDocument { expected: Expected, depth: usize },
}

/// A character that cannot continue or start a token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LexError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("unknown keyword '{0}'")]
    UnknownKeyword(String),
    #[error("unterminated string")]
    UnterminatedString,
}

/// A well-formed token in a position the grammar does not allow.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SyntaxError {
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: TokenKind, expected: Expected },
    #[error("{found} does not close the open {open}")]
    MismatchedCloser { found: TokenKind, open: Context },
    #[error("unexpected {0} after end of document")]
    TrailingContent(TokenKind),
    #[error("nesting depth exceeds limit of {0}")]
    DepthLimitExceeded(usize),
}

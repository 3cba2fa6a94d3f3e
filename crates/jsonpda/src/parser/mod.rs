//! Token-level parser: a pushdown automaton that decides whether a token
//! sequence is a document.
//!
//! Overview
//! - The parser keeps a [`ParseState`] and a [`ContextStack`] whose bottom
//!   marker is never popped. `{` and `[` push, the matching closer pops.
//! - After any complete value (a scalar, or a container whose closer was just
//!   consumed) the next state depends only on the stack top: at the bottom the
//!   document is done, otherwise a comma or a closer must follow.
//! - The transition function is a single exhaustive `match` over
//!   `(state, token kind)`. Any pair without an arm is a rejection.
//!
//! Trailing commas
//! - A comma inside an object leads to `ExpectKey`, which accepts only a
//!   string, and a comma inside an array leads to `ExpectValue`, which has no
//!   arm for `]`. Neither state can close its container, so `[1,]` and
//!   `{"a": 1,}` are rejected at the closer.

mod stack;


use core::fmt;

use tracing::{debug, trace};

pub use stack::Context;
pub(crate) use stack::{ContextStack, Frame};

use crate::{
    error::{ErrorKind, SyntaxError},
    options::ValidatorOptions,
    token::{Token, TokenKind},
};

/// The parser's current automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// A value must follow: document start, after `:` or after `,` in an array.
    #[default]
    ExpectValue,
    /// Just after `[`: a value or `]`.
    ExpectValueOrEnd,
    /// Just after `{`: a key or `}`.
    ExpectKeyOrEnd,
    /// After `,` in an object: only a key.
    ExpectKey,
    ExpectColon,
    ExpectCommaOrEnd,
    /// A complete top-level value has been consumed.
    Done,
}

/// What the parser was waiting for when it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Expected {
    Value,
    ValueOrArrayEnd,
    KeyOrObjectEnd,
    Key,
    Colon,
    CommaOrEnd(Context),
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Expected::Value => "a value",
            Expected::ValueOrArrayEnd => "a value or ']'",
            Expected::KeyOrObjectEnd => "a key or '}'",
            Expected::Key => "a key",
            Expected::Colon => "':'",
            Expected::CommaOrEnd(Context::Object) => "',' or '}'",
            Expected::CommaOrEnd(Context::Array) => "',' or ']'",
            Expected::EndOfInput => "end of input",
        })
    }
}

/// The token-level pushdown automaton.
///
/// ```rust
/// use jsonpda::{Parser, Token};
///
/// let mut parser = Parser::default();
/// for token in [Token::LeftBracket, Token::Null, Token::RightBracket] {
///     parser.feed(&token).unwrap();
/// }
/// assert!(parser.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    state: ParseState,
    stack: ContextStack,

    max_depth: Option<usize>,
    multiple_values: bool,
}

impl Parser {
    /// Creates a parser expecting the first value of a document.
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            state: ParseState::ExpectValue,
            stack: ContextStack::new(),
            max_depth: options.max_depth,
            multiple_values: options.allow_multiple_json_values,
        }
    }

    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Number of objects and arrays currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// `true` when a complete document has been consumed and nothing is open.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == ParseState::Done && self.stack.len() == 1
    }

    /// What the next token has to be.
    #[must_use]
    pub fn expected(&self) -> Expected {
        match (self.state, self.stack.top()) {
            (ParseState::ExpectValue, _) => Expected::Value,
            (ParseState::ExpectValueOrEnd, _) => Expected::ValueOrArrayEnd,
            (ParseState::ExpectKeyOrEnd, _) => Expected::KeyOrObjectEnd,
            (ParseState::ExpectKey, _) => Expected::Key,
            (ParseState::ExpectColon, _) => Expected::Colon,
            (ParseState::ExpectCommaOrEnd, Frame::Open(context)) => Expected::CommaOrEnd(context),
            (ParseState::ExpectCommaOrEnd | ParseState::Done, _) => Expected::EndOfInput,
        }
    }

    /// Feeds one token.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] if the token is not allowed here. The parser
    /// should be discarded after the first error.
    pub fn feed(&mut self, token: &Token) -> Result<(), SyntaxError> {
        let kind = token.kind();
        match self.transition(kind) {
            Ok(()) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(
                    self.state != ParseState::Done || self.depth() == 0,
                    "Internal error: document done with {} open containers",
                    self.depth()
                );
                trace!(?kind, state = ?self.state, depth = self.depth(), "accepted token");
                Ok(())
            }
            Err(err) => {
                debug!(%err, state = ?self.state, "rejected token");
                Err(err)
            }
        }
    }

    /// Checks that the tokens fed so far form a complete document.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompleteDocument`] when a value or closer is
    /// still missing, including when no token was fed at all.
    pub fn finish(&self) -> Result<(), ErrorKind> {
        if self.is_complete() {
            return Ok(());
        }
        let err = ErrorKind::IncompleteDocument {
            expected: self.expected(),
            depth: self.depth(),
        };
        debug!(%err, "incomplete document");
        Err(err)
    }

    // ------------------------------------------------------------------------------------------------
    // Transition function
    // ------------------------------------------------------------------------------------------------

    fn transition(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        use ParseState::{
            Done, ExpectColon, ExpectCommaOrEnd, ExpectKey, ExpectKeyOrEnd, ExpectValue,
            ExpectValueOrEnd,
        };

        if self.state == Done && self.multiple_values {
            self.state = ExpectValue;
        }

        let top = self.stack.top();
        match (self.state, kind) {
            (ExpectValue | ExpectValueOrEnd, TokenKind::LeftBrace) => self.open(Context::Object),
            (ExpectValue | ExpectValueOrEnd, TokenKind::LeftBracket) => self.open(Context::Array),
            (ExpectValue | ExpectValueOrEnd, kind) if kind.is_scalar() => {
                self.after_value();
                Ok(())
            }
            (ExpectValueOrEnd, TokenKind::RightBracket) => self.close(kind, Context::Array),

            (ExpectKeyOrEnd | ExpectKey, TokenKind::String) => {
                self.state = ExpectColon;
                Ok(())
            }
            (ExpectKeyOrEnd, TokenKind::RightBrace) => self.close(kind, Context::Object),

            (ExpectColon, TokenKind::Colon) => {
                self.state = ExpectValue;
                Ok(())
            }

            (ExpectCommaOrEnd, TokenKind::Comma) if top == Frame::Open(Context::Object) => {
                self.state = ExpectKey;
                Ok(())
            }
            (ExpectCommaOrEnd, TokenKind::Comma) if top == Frame::Open(Context::Array) => {
                self.state = ExpectValue;
                Ok(())
            }
            (ExpectCommaOrEnd, TokenKind::RightBrace) => self.close(kind, Context::Object),
            (ExpectCommaOrEnd, TokenKind::RightBracket) => self.close(kind, Context::Array),

            (Done, found) => Err(SyntaxError::TrailingContent(found)),

            (
                ExpectValue | ExpectValueOrEnd | ExpectKeyOrEnd | ExpectKey | ExpectColon
                | ExpectCommaOrEnd,
                found,
            ) => Err(SyntaxError::UnexpectedToken {
                found,
                expected: self.expected(),
            }),
        }
    }

    fn open(&mut self, context: Context) -> Result<(), SyntaxError> {
        if let Some(max) = self.max_depth.filter(|&max| self.stack.depth() >= max) {
            return Err(SyntaxError::DepthLimitExceeded(max));
        }
        self.stack.push(context);
        self.state = match context {
            Context::Object => ParseState::ExpectKeyOrEnd,
            Context::Array => ParseState::ExpectValueOrEnd,
        };
        Ok(())
    }

    fn close(&mut self, found: TokenKind, context: Context) -> Result<(), SyntaxError> {
        match self.stack.top() {
            Frame::Open(open) if open == context => {
                self.stack.pop();
                self.after_value();
                Ok(())
            }
            Frame::Open(open) => Err(SyntaxError::MismatchedCloser { found, open }),
            Frame::Bottom => Err(SyntaxError::UnexpectedToken {
                found,
                expected: self.expected(),
            }),
        }
    }

    /// Shared step after any complete value.
    fn after_value(&mut self) {
        self.state = match self.stack.top() {
            Frame::Bottom => ParseState::Done,
            Frame::Open(_) => ParseState::ExpectCommaOrEnd,
        };
    }
}

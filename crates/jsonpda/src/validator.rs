//! The driver that composes a [`Lexer`] and a [`Parser`].
//!
//! Every character goes to the lexer; every token the lexer completes goes
//! straight to the parser, in order. The first rejection from either automaton
//! ends validation: the error is recorded together with the position of the
//! character being processed, and every later call returns that same error
//! without looking at more input.
//!
//! Input can be supplied as `&str` chunks, single characters, or raw UTF-8
//! byte chunks whose boundaries may fall inside a multi-byte sequence.

use alloc::vec::Vec;
use core::mem;

use tracing::{debug, trace};

use crate::{
    error::{ErrorKind, ValidationError},
    lexer::Lexer,
    options::ValidatorOptions,
    parser::Parser,
};

/// A place in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Position {
    /// Zero-based character offset.
    pub offset: usize,
    /// One-based line; advanced by `\n`.
    pub line: usize,
    /// One-based column, counted in characters.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    fn advance(&mut self, c: char) {
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

/// Incremental validator for one document (or, with
/// [`ValidatorOptions::allow_multiple_json_values`], one stream of documents).
///
/// ```rust
/// use jsonpda::Validator;
///
/// let mut validator = Validator::default();
/// validator.feed(r#"{"items": [1, "#).unwrap();
/// assert!(!validator.is_complete());
/// validator.feed("2]}").unwrap();
/// assert!(validator.is_complete());
/// assert!(validator.finish().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    lexer: Lexer,
    parser: Parser,

    position: Position,
    tokens_accepted: usize,
    /// Leading bytes of a UTF-8 sequence split across `feed_bytes` calls.
    carry: Vec<u8>,
    error: Option<ValidationError>,
}

impl Validator {
    /// Creates a validator at the start of the input.
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            lexer: Lexer::new(options),
            parser: Parser::new(options),
            position: Position::default(),
            tokens_accepted: 0,
            carry: Vec::new(),
            error: None,
        }
    }

    /// Feeds a chunk of text.
    ///
    /// # Errors
    ///
    /// Returns the first error in the input seen so far.
    pub fn feed(&mut self, text: &str) -> Result<(), ValidationError> {
        self.check()?;
        trace!(len = text.len(), "feed");
        text.chars().try_for_each(|c| self.process(c))
    }

    /// Feeds a single character.
    ///
    /// # Errors
    ///
    /// Returns the first error in the input seen so far.
    pub fn feed_char(&mut self, c: char) -> Result<(), ValidationError> {
        self.check()?;
        self.process(c)
    }

    /// Feeds a chunk of UTF-8 bytes.
    ///
    /// A multi-byte sequence may be split across calls. Bytes that cannot be
    /// decoded are passed on as U+FFFD, which is ordinary content inside a
    /// string and an invalid character elsewhere.
    ///
    /// # Errors
    ///
    /// Returns the first error in the input seen so far.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(), ValidationError> {
        self.check()?;
        trace!(len = bytes.len(), carried = self.carry.len(), "feed bytes");
        if self.carry.is_empty() {
            self.decode(bytes, false)
        } else {
            let mut joined = mem::take(&mut self.carry);
            joined.extend_from_slice(bytes);
            self.decode(&joined, false)
        }
    }

    /// Ends the input and checks that it formed a complete document.
    ///
    /// # Errors
    ///
    /// Returns the first error in the input, or an incomplete-document error
    /// when input ended inside a string, object or array, or before any value.
    pub fn finish(mut self) -> Result<(), ValidationError> {
        self.check()?;
        if !self.carry.is_empty() {
            let carry = mem::take(&mut self.carry);
            self.decode(&carry, true)?;
        }

        let parser = &mut self.parser;
        let accepted = &mut self.tokens_accepted;
        let flushed = self.lexer.flush().map_err(ErrorKind::from).and_then(|token| {
            if let Some(token) = token {
                parser.feed(&token)?;
                *accepted += 1;
            }
            Ok(())
        });
        if let Err(kind) = flushed {
            return Err(self.fail(kind));
        }

        self.parser.finish().map_err(|kind| self.fail(kind))?;
        debug!(tokens = self.tokens_accepted, chars = self.position.offset, "document accepted");
        Ok(())
    }

    /// Whether the input so far would be a complete document if it ended
    /// now.
    ///
    /// Runs [`Validator::finish`] on a copy, so the cost grows with the current
    /// nesting depth and pending token length.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.clone().finish().is_ok()
    }

    /// Number of objects and arrays currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parser.depth()
    }

    /// Position of the next character to be fed.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of tokens the parser has accepted so far.
    #[must_use]
    pub fn tokens_accepted(&self) -> usize {
        self.tokens_accepted
    }

    /// The error that stopped validation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    fn check(&self) -> Result<(), ValidationError> {
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn process(&mut self, c: char) -> Result<(), ValidationError> {
        let parser = &mut self.parser;
        let accepted = &mut self.tokens_accepted;
        let result = self.lexer.feed_with(c, |token| {
            parser.feed(&token)?;
            *accepted += 1;
            Ok::<(), ErrorKind>(())
        });
        match result {
            Ok(()) => {
                self.position.advance(c);
                Ok(())
            }
            Err(kind) => Err(self.fail(kind)),
        }
    }

    /// Decodes `bytes` and processes each character. An incomplete sequence
    /// at the end is carried over unless `end` is set.
    fn decode(&mut self, bytes: &[u8], end: bool) -> Result<(), ValidationError> {
        let mut rest = bytes;
        while !rest.is_empty() {
            let (decoded, len) = bstr::decode_utf8(rest);
            match decoded {
                Some(c) => self.process(c)?,
                None if len == rest.len() && !end => {
                    self.carry.extend_from_slice(rest);
                    return Ok(());
                }
                None => self.process(char::REPLACEMENT_CHARACTER)?,
            }
            rest = &rest[len..];
        }
        Ok(())
    }

    fn fail(&mut self, kind: ErrorKind) -> ValidationError {
        let token_index = matches!(kind, ErrorKind::Syntax(_)).then_some(self.tokens_accepted);
        let err = ValidationError::new(kind, self.position, token_index);
        debug!(%err, "validation failed");
        self.error = Some(err.clone());
        err
    }
}

/// Returns `true` if `text` is a single syntactically valid document.
///
/// ```rust
/// assert!(jsonpda::validate(r#"{"name": "Alice", "nested": {"x": 1}}"#));
/// assert!(!jsonpda::validate(r#"{"name": "Alice",}"#));
/// ```
#[must_use]
pub fn validate(text: &str) -> bool {
    validate_with(text, ValidatorOptions::default()).is_ok()
}

/// Validates `text` with `options`, returning the first error.
///
/// # Errors
///
/// Returns the first lexical or syntax error, or an incomplete-document error.
pub fn validate_with(text: &str, options: ValidatorOptions) -> Result<(), ValidationError> {
    let mut validator = Validator::new(options);
    validator.feed(text)?;
    validator.finish()
}

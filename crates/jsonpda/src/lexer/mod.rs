//! Character-level lexer: a finite state automaton that turns characters into
//! [`Token`]s.
//!
//! Overview
//! - The lexer holds exactly one [`LexState`] and a pending buffer with the
//!   text of the token being recognized (string body, number literal or
//!   keyword). Nothing else survives between calls, so memory is bounded by the
//!   longest single token.
//! - The lexer knows nothing about grammar. `}{` lexes fine; deciding that it
//!   is not a document is the parser's job.
//!
//! Lookahead
//! - Numbers and keywords have no closing delimiter. They end on the first
//!   character that cannot extend them, and that character must then be lexed
//!   from `Start` since it may begin the next token (`1,` or `null]`). The
//!   terminator is kept in a one-slot pending cell and the transition loop runs
//!   again, so a single `feed` can emit two tokens and never recurses.
//!
//! Payloads
//! - String payloads keep escape sequences verbatim (`"a\"b"` yields the
//!   payload `a\"b`). Number payloads are the literal text; no numeric
//!   grammar beyond the character class is enforced here.

use alloc::string::String;
use core::mem;

use tracing::trace;

use crate::{error::LexError, options::ValidatorOptions, token::Token};


/// The lexer's current automaton state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexState {
    #[default]
    Start,
    InString,
    InStringEscape,
    InNumber,
    InKeyword,
}

/// Tokens emitted by a single [`Lexer::feed`] call.
///
/// A character can finish a number or keyword and then be a token itself, so
/// at most two tokens come out of one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    first: Option<Token>,
    second: Option<Token>,
}

impl Tokens {
    fn push(&mut self, token: Token) {
        if self.first.is_none() {
            self.first = Some(token);
        } else {
            debug_assert!(self.second.is_none(), "a character emits at most two tokens");
            self.second = Some(token);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }
}

impl Iterator for Tokens {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.first.take().or_else(|| self.second.take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::from(self.first.is_some()) + usize::from(self.second.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tokens {}

/// The character-to-token automaton.
///
/// ```rust
/// use jsonpda::{Lexer, Token};
///
/// let mut lexer = Lexer::default();
/// assert_eq!(lexer.feed('1').unwrap().count(), 0);
/// let tokens: Vec<_> = lexer.feed(',').unwrap().collect();
/// assert_eq!(tokens, [Token::Number("1".into()), Token::Comma]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexer {
    state: LexState,
    buffer: String,

    allow_unicode_whitespace: bool,
    lenient: bool,
}

impl Lexer {
    /// Creates a lexer in [`LexState::Start`] configured by `options`.
    #[must_use]
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            state: LexState::Start,
            buffer: String::new(),
            allow_unicode_whitespace: options.allow_unicode_whitespace,
            lenient: options.lenient_lexing,
        }
    }

    #[must_use]
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Text accumulated for the token currently being recognized.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Feeds one character, returning the tokens it completed.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the character cannot start a token (or a
    /// keyword it terminates is unknown) and lenient lexing is off. Tokens
    /// completed by the same character before the error are discarded; use
    /// [`Lexer::feed_with`] to observe them.
    pub fn feed(&mut self, c: char) -> Result<Tokens, LexError> {
        let mut out = Tokens::default();
        self.feed_with(c, |token| {
            out.push(token);
            Ok::<(), LexError>(())
        })?;
        Ok(out)
    }

    /// Feeds one character, handing each completed token to `sink` in order.
    ///
    /// Stops at the first error, whether it comes from the lexer or from the
    /// sink.
    ///
    /// # Errors
    ///
    /// Returns the sink's error, or a [`LexError`] converted into `E`.
    pub fn feed_with<E, F>(&mut self, c: char, mut sink: F) -> Result<(), E>
    where
        E: From<LexError>,
        F: FnMut(Token) -> Result<(), E>,
    {
        let mut lookahead = Some(c);
        while let Some(c) = lookahead.take() {
            let (token, reprocess) = self.step(c)?;
            if let Some(token) = token {
                trace!(kind = ?token.kind(), text = token.text(), "lexed");
                sink(token)?;
            }
            lookahead = reprocess;
        }
        Ok(())
    }

    /// Ends the input, returning the token still pending, if any.
    ///
    /// The lexer is back in [`LexState::Start`] afterwards, even on error.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::UnterminatedString`] if a string is open, and
    /// [`LexError::UnknownKeyword`] for an unknown trailing keyword when lenient
    /// lexing is off.
    pub fn flush(&mut self) -> Result<Option<Token>, LexError> {
        let state = mem::take(&mut self.state);
        let token = match state {
            LexState::Start => None,
            LexState::InNumber => Some(self.take_number()),
            LexState::InKeyword => self.take_keyword()?,
            LexState::InString | LexState::InStringEscape => {
                self.buffer.clear();
                return Err(LexError::UnterminatedString);
            }
        };
        if let Some(token) = &token {
            trace!(?token, "lexed at end of input");
        }
        Ok(token)
    }

    // ------------------------------------------------------------------------------------------------
    // Transition function
    // ------------------------------------------------------------------------------------------------

    /// One transition. Returns the token completed by `c`, and `c` itself when
    /// it ended a number or keyword and must be lexed again from `Start`.
    fn step(&mut self, c: char) -> Result<(Option<Token>, Option<char>), LexError> {
        match self.state {
            LexState::Start => self.step_start(c).map(|token| (token, None)),

            LexState::InString => match c {
                '\\' => {
                    self.buffer.push(c);
                    self.state = LexState::InStringEscape;
                    Ok((None, None))
                }
                '"' => {
                    self.state = LexState::Start;
                    Ok((Some(Token::String(mem::take(&mut self.buffer))), None))
                }
                _ => {
                    self.buffer.push(c);
                    Ok((None, None))
                }
            },

            // Any character may follow a backslash; escapes are not decoded.
            LexState::InStringEscape => {
                self.buffer.push(c);
                self.state = LexState::InString;
                Ok((None, None))
            }

            LexState::InNumber if is_number_char(c) => {
                self.buffer.push(c);
                Ok((None, None))
            }
            LexState::InNumber => {
                self.state = LexState::Start;
                Ok((Some(self.take_number()), Some(c)))
            }

            LexState::InKeyword if c.is_alphabetic() => {
                self.buffer.push(c);
                Ok((None, None))
            }
            LexState::InKeyword => {
                self.state = LexState::Start;
                Ok((self.take_keyword()?, Some(c)))
            }
        }
    }

    fn step_start(&mut self, c: char) -> Result<Option<Token>, LexError> {
        if let Some(token) = Token::punctuator(c) {
            return Ok(Some(token));
        }
        match c {
            '"' => {
                self.buffer.clear();
                self.state = LexState::InString;
            }
            '-' | '0'..='9' => {
                self.seed(c);
                self.state = LexState::InNumber;
            }
            't' | 'f' | 'n' => {
                self.seed(c);
                self.state = LexState::InKeyword;
            }
            c if self.is_whitespace(c) => {}
            c if self.lenient => {
                trace!(?c, "skipped invalid character");
            }
            c => return Err(LexError::InvalidCharacter(c)),
        }
        Ok(None)
    }

    fn seed(&mut self, c: char) {
        self.buffer.clear();
        self.buffer.push(c);
    }

    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\n' | '\r' | '\t') || (self.allow_unicode_whitespace && c.is_whitespace())
    }

    fn take_number(&mut self) -> Token {
        Token::Number(mem::take(&mut self.buffer))
    }

    fn take_keyword(&mut self) -> Result<Option<Token>, LexError> {
        let literal = mem::take(&mut self.buffer);
        match Token::keyword(&literal) {
            Some(token) => Ok(Some(token)),
            None if self.lenient => {
                trace!(%literal, "dropped unknown keyword");
                Ok(None)
            }
            None => Err(LexError::UnknownKeyword(literal)),
        }
    }
}

fn is_number_char(c: char) -> bool {
    matches!(c, '0'..='9' | '.' | 'e' | 'E' | '+' | '-')
}

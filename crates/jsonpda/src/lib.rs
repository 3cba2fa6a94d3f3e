//! A streaming structural validator for JSON.
//!
//! Validation is two composed automata: a character-level [`Lexer`] (a finite
//! state automaton producing [`Token`]s) and a token-level [`Parser`] (a
//! pushdown automaton whose stack tracks object and array nesting). The
//! [`Validator`] drives both one character at a time, so input can be checked
//! as it arrives with memory proportional to the longest token plus the
//! nesting depth.
//!
//! Only structure is checked. No values are built, string escapes are not
//! decoded and number literals are not converted.
//!
//! ```rust
//! use jsonpda::{validate, validate_with, ValidatorOptions};
//!
//! assert!(validate("[1, 2, 3]"));
//! assert!(!validate("[1, 2, 3,]"));
//!
//! let err = validate_with("[[[[1]]]", ValidatorOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "unexpected end of input, expected ',' or ']' at 1:9");
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod lexer;
mod options;
mod parser;
mod token;
mod validator;

#[cfg(test)]
mod tests;

pub use error::{ErrorKind, LexError, SyntaxError, ValidationError};
pub use lexer::{LexState, Lexer, Tokens};
pub use options::ValidatorOptions;
pub use parser::{Context, Expected, ParseState, Parser};
pub use token::{Token, TokenKind};
pub use validator::{Position, Validator, validate, validate_with};

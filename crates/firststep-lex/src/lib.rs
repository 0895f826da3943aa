//! firststep-lex - Lexical Analyzer
//!
//! Turns source text into a stream of [`Token`]s (spec.md §4.1). The
//! lexer is a hand-written single-character-lookahead scanner built over
//! a [`Cursor`](cursor::Cursor) that tracks byte offset and line/column
//! for diagnostics, the same split `faxc-lex` uses between a cursor and
//! a dispatch layer.
//!
//! Unlike the teacher's C++ ancestor (and the `faxc-lex` cursor/core
//! split it mirrors, which stash a token's payload behind separate
//! accessors), `Token` here carries its payload directly — `Token::Id`
//! holds the interned name, `Token::Integer` holds the value. That's a
//! representation change only: every accessor the original exposed
//! (`id_val`, `int_val`, `key_val`, `op_val`, `other_val`) corresponds to
//! matching on the token's own payload instead of asking the lexer for it.

mod cursor;
#[cfg(test)]
mod edge_cases;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Keyword, Operator, Token};

//! Core lexer: the `Lexer` struct and its top-level dispatch (spec.md §4.1).

use firststep_util::{Handler, Span, Stage};

use crate::cursor::Cursor;
use crate::token::{Operator, Token};

/// Lexer for firststep source text.
///
/// One character of lookahead, built over a [`Cursor`]. `next_token` skips
/// whitespace/end-of-line and `#` comments, then dispatches on the current
/// character.
pub struct Lexer<'a> {
    pub(crate) cursor: Cursor<'a>,
    pub(crate) handler: &'a Handler,
    pub(crate) token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
        }
    }

    /// Returns the next token, or [`Token::End`] at end of input.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token::End;
        }

        let c = self.cursor.current_char();
        if c == '_' || c.is_ascii_alphabetic() {
            self.lex_identifier()
        } else if c.is_ascii_digit() {
            self.lex_integer()
        } else if Operator::is_operator_char(c) {
            self.lex_operator()
        } else {
            self.cursor.advance();
            Token::Other(c)
        }
    }

    pub(crate) fn report_error(&self, message: impl Into<String>) {
        self.handler.error(
            Stage::Lexer,
            message,
            Span::new(self.token_start as u32, self.cursor.position() as u32),
        );
    }

    /// Span of the most recently returned token, for callers (the parser)
    /// that need a location to attach to their own diagnostics.
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.cursor.position() as u32)
    }
}

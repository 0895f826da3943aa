//! Identifier and keyword lexing (spec.md §4.1).

use firststep_util::Symbol;

use crate::token::{Keyword, Token};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a maximal run of `[a-zA-Z0-9_]`, having already consumed the
    /// first `[a-zA-Z_]` character's check in `next_token`'s dispatch.
    pub fn lex_identifier(&mut self) -> Token {
        while {
            let c = self.cursor.current_char();
            c == '_' || c.is_ascii_alphanumeric()
        } {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        match Keyword::lookup(text) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Id(Symbol::intern(text)),
        }
    }
}

//! Operator lexing (spec.md §4.1): a maximal run of `+-*/%<=!&|`, validated
//! against the fixed spelling table afterward rather than matched
//! character-by-character.

use crate::token::{Operator, Token};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub fn lex_operator(&mut self) -> Token {
        while Operator::is_operator_char(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        match Operator::lookup(text) {
            Some(op) => Token::Operator(op),
            None => {
                self.report_error(format!("'{}' is not a valid operator", text));
                Token::Error
            }
        }
    }
}

//! Integer literal lexing (spec.md §4.1).

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a maximal run of decimal digits. A leading zero followed by
    /// more digits is rejected, matching the original's `strtol` check on
    /// `num[0] == '0' && num.size() > 1`.
    pub fn lex_integer(&mut self) -> Token {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        if text.len() > 1 && text.starts_with('0') {
            self.report_error(format!("leading zero in integer literal '{}'", text));
            return Token::Error;
        }

        match text.parse::<i32>() {
            Ok(value) => Token::Integer(value),
            Err(_) => {
                self.report_error(format!("integer literal '{}' out of range", text));
                Token::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firststep_util::Handler;

    fn lex(source: &str) -> Token {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &handler);
        lexer.next_token()
    }

    #[test]
    fn single_digit() {
        assert_eq!(lex("0"), Token::Integer(0));
    }

    #[test]
    fn multi_digit() {
        assert_eq!(lex("12345"), Token::Integer(12345));
    }

    #[test]
    fn leading_zero_multi_digit_is_an_error() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("007", &handler);
        assert_eq!(lexer.next_token(), Token::Error);
        assert_eq!(handler.error_num(firststep_util::Stage::Lexer), 1);
    }

    #[test]
    fn out_of_range_is_an_error() {
        let handler = Handler::new();
        let mut lexer = crate::Lexer::new("99999999999999999999", &handler);
        assert_eq!(lexer.next_token(), Token::Error);
        assert!(handler.has_errors());
    }
}

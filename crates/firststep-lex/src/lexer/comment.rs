//! Whitespace and `#` line-comment skipping (spec.md §4.1).

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace, end-of-line (`\n` or `\r`), and `#` comments. Both
    /// count as "skip and fetch the next real token" per spec.md §4.1, so
    /// this loops rather than recursing through `next_token` itself.
    pub(crate) fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.cursor.is_at_end() {
                return;
            }
            match self.cursor.current_char() {
                ' ' | '\t' | '\n' | '\r' => self.cursor.advance(),
                '#' => {
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                }
                _ => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use firststep_util::Handler;

    use crate::token::Token;
    use crate::Lexer;

    #[test]
    fn comment_runs_to_end_of_line() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("# a comment\n42", &handler);
        assert_eq!(lexer.next_token(), Token::Integer(42));
    }

    #[test]
    fn comment_at_eof_with_no_trailing_newline() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("# trailing comment", &handler);
        assert_eq!(lexer.next_token(), Token::End);
    }

    #[test]
    fn whitespace_and_comments_interleave() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("  # one\n  # two\n  return", &handler);
        assert_eq!(
            lexer.next_token(),
            Token::Keyword(crate::token::Keyword::Return)
        );
    }
}

//! Edge case tests for firststep-lex — spec.md §8 property 1 (lexer
//! totality) and the odd corners of §4.1's rules that the per-file unit
//! tests don't already cover individually.

#[cfg(test)]
mod tests {
    use crate::{Keyword, Lexer, Operator, Token};
    use firststep_util::{Handler, Stage, Symbol};

    fn lex_all(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let mut tokens = Vec::new();
        loop {
            let t = lexer.next_token();
            if t == Token::End {
                break;
            }
            tokens.push(t);
        }
        tokens
    }

    #[test]
    fn test_edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn test_edge_only_whitespace_and_comments() {
        assert!(lex_all("   \n\t  # nothing but a comment\n   ").is_empty());
    }

    #[test]
    fn test_edge_every_byte_produces_a_token_or_end() {
        // spec.md §8 property 1: totality over every byte sequence, not
        // just well-formed programs. A run of punctuation the grammar
        // never uses on its own should still terminate cleanly.
        let handler = Handler::new();
        let mut lexer = Lexer::new(";;;???^^^", &handler);
        let mut seen = 0;
        loop {
            match lexer.next_token() {
                Token::End => break,
                _ => {
                    seen += 1;
                    if seen > 100 {
                        panic!("lexer did not terminate on unexpected bytes");
                    }
                }
            }
        }
    }

    #[test]
    fn test_edge_define_operator_is_a_single_token() {
        // `:` only ever appears as the first half of `:=`; lexing it as
        // one run (not `Other(':')` followed by `Operator(Assign)`) is
        // what makes every `name := expr` in the language parse at all.
        assert_eq!(lex_all(":="), vec![Token::Operator(Operator::Define)]);
    }

    #[test]
    fn test_edge_lone_colon_is_a_lexical_error() {
        let handler = Handler::new();
        let mut lexer = Lexer::new(": x", &handler);
        assert_eq!(lexer.next_token(), Token::Error);
        assert_eq!(handler.error_num(Stage::Lexer), 1);
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "x".repeat(5000);
        let tokens = lex_all(&name);
        assert_eq!(tokens, vec![Token::Id(Symbol::intern(&name))]);
    }

    #[test]
    fn test_edge_many_consecutive_operators_still_maximal_munches() {
        assert_eq!(
            lex_all("a<=b==c!=d"),
            vec![
                Token::Id(Symbol::intern("a")),
                Token::Operator(Operator::LessEq),
                Token::Id(Symbol::intern("b")),
                Token::Operator(Operator::Eq),
                Token::Id(Symbol::intern("c")),
                Token::Operator(Operator::NotEq),
                Token::Id(Symbol::intern("d")),
            ]
        );
    }

    #[test]
    fn test_edge_carriage_return_counts_as_end_of_line() {
        assert_eq!(lex_all("main\r\nx"), lex_all("main\nx"));
    }

    #[test]
    fn test_edge_comment_directly_abutting_a_token() {
        assert_eq!(lex_all("x#comment\ny"), lex_all("x\ny"));
    }

    #[test]
    fn test_edge_zero_is_not_a_leading_zero_error() {
        assert_eq!(lex_all("0"), vec![Token::Integer(0)]);
    }

    #[test]
    fn test_edge_all_keywords_distinct_from_identifiers_with_shared_prefix() {
        for (spelling, kw) in Keyword::ALL {
            let prefixed = format!("{spelling}_tail");
            assert_eq!(
                lex_all(&prefixed),
                vec![Token::Id(Symbol::intern(&prefixed))],
                "{spelling} as a prefix must still lex as one identifier"
            );
            assert_eq!(lex_all(spelling), vec![Token::Keyword(kw)]);
        }
    }
}

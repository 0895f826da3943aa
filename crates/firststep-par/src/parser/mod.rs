//! The `Parser` struct: lookahead state and the token-matching helpers
//! every grammar tier is built from.

mod expr;
mod stmt;

use firststep_lex::{Keyword, Lexer, Operator, Token};
use firststep_util::{Handler, Stage, Symbol};

use crate::ast::FunDef;

/// Recursive-descent parser over firststep source, one token of lookahead.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let cur = lexer.next_token();
        Self { lexer, cur, handler }
    }

    /// Returns the next top-level function definition, or `None` once
    /// input is exhausted (spec.md §4.2's `parse_next()`).
    pub fn parse_next(&mut self) -> Option<Result<FunDef, ()>> {
        if self.cur == Token::End {
            return None;
        }
        Some(self.parse_fun_def())
    }

    /// Parses every function definition in the source, stopping at the
    /// first error. A thin convenience over repeated [`Parser::parse_next`]
    /// calls for callers (the driver, tests) that want the whole program.
    pub fn parse_program(&mut self) -> Result<Vec<FunDef>, ()> {
        let mut funcs = Vec::new();
        while let Some(result) = self.parse_next() {
            funcs.push(result?);
        }
        Ok(funcs)
    }

    fn advance(&mut self) {
        self.cur = self.lexer.next_token();
    }

    fn error(&self, message: impl Into<String>) {
        self.handler.error(Stage::Parser, message, self.lexer.token_span());
    }

    fn expect_id(&mut self) -> Result<Symbol, ()> {
        match self.cur {
            Token::Id(name) => {
                self.advance();
                Ok(name)
            }
            _ => {
                self.error("expected identifier");
                Err(())
            }
        }
    }

    fn expect_other(&mut self, c: char) -> Result<(), ()> {
        if self.cur == Token::Other(c) {
            self.advance();
            Ok(())
        } else {
            self.error(format!("expected '{}'", c));
            Err(())
        }
    }

    fn at_other(&self, c: char) -> bool {
        self.cur == Token::Other(c)
    }

    fn at_operator(&self, op: Operator) -> bool {
        self.cur == Token::Operator(op)
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.cur == Token::Keyword(kw)
    }
}

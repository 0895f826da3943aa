//! `FunDef` / `Block` / `Stmt` parsing (spec.md §4.2).

use firststep_lex::{Keyword, Operator, Token};

use crate::ast::{Block, ElseBranch, FunDef, IfStmt, Stmt};

use super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_fun_def(&mut self) -> Result<FunDef, ()> {
        let name = self.expect_id()?;
        self.expect_other('(')?;

        let mut params = Vec::new();
        if !self.at_other(')') {
            params.push(self.expect_id()?);
            while self.at_other(',') {
                self.advance();
                params.push(self.expect_id()?);
            }
        }
        self.expect_other(')')?;

        let body = self.parse_block()?;
        Ok(FunDef { name, params, body })
    }

    pub(crate) fn parse_block(&mut self) -> Result<Block, ()> {
        self.expect_other('{')?;
        let mut stmts = Vec::new();
        while !self.at_other('}') {
            if self.cur == Token::End {
                self.error("unexpected end of input inside block");
                return Err(());
            }
            stmts.push(self.parse_stmt()?);
        }
        self.advance();
        Ok(Block { stmts })
    }

    /// A statement is `Id (":=" | "=") Expr`, `"if" ...`, or `"return"
    /// Expr`. Unlike the original's implicit switch fall-through to its
    /// error path, every unrecognized case here returns an explicit error.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ()> {
        match self.cur {
            Token::Keyword(Keyword::If) => Ok(Stmt::If(self.parse_if_else()?)),
            Token::Keyword(Keyword::Return) => self.parse_return(),
            Token::Id(_) => self.parse_define_assign(),
            _ => {
                self.error("expected a statement (identifier, 'if', or 'return')");
                Err(())
            }
        }
    }

    fn parse_define_assign(&mut self) -> Result<Stmt, ()> {
        let name = self.expect_id()?;
        if self.at_operator(Operator::Define) {
            self.advance();
            let expr = self.parse_expr()?;
            Ok(Stmt::Define { name, expr })
        } else if self.at_operator(Operator::Assign) {
            self.advance();
            let expr = self.parse_expr()?;
            Ok(Stmt::Assign { name, expr })
        } else {
            self.error("expected ':=' or '=' after identifier in statement");
            Err(())
        }
    }

    fn parse_if_else(&mut self) -> Result<IfStmt, ()> {
        self.advance(); // 'if'
        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_branch = if self.at_keyword(Keyword::Else) {
            self.advance();
            if self.at_keyword(Keyword::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_else()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };
        Ok(IfStmt { cond, then_block, else_branch })
    }

    fn parse_return(&mut self) -> Result<Stmt, ()> {
        self.advance(); // 'return'
        let expr = self.parse_expr()?;
        Ok(Stmt::Return { expr })
    }
}

//! Expression parsing (spec.md §4.2): the `Expr`/`LAnd`/`Eq`/`Rel`/`Add`/
//! `Mul` precedence tiers, `Unary`, and `Value`.
//!
//! Every binary tier has the same shape — a left-hand side from the next
//! tier down, folded left-associatively with `(op, rhs)` pairs for as long
//! as the current token is one of the tier's operators — so it's written
//! once as [`Parser::parse_binary_tier`] and each tier just supplies its
//! operator set and its "next tier down" method, the same generalization
//! the original's `ParseBinary(parser, {ops...})` makes over a closure.

use firststep_lex::{Operator, Token};

use crate::ast::{BinOp, Expr, UnOp};

use super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(&[Operator::LOr], Self::parse_land_expr)
    }

    fn parse_land_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(&[Operator::LAnd], Self::parse_eq_expr)
    }

    fn parse_eq_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(&[Operator::Eq, Operator::NotEq], Self::parse_rel_expr)
    }

    fn parse_rel_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(&[Operator::Less, Operator::LessEq], Self::parse_add_expr)
    }

    fn parse_add_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(&[Operator::Add, Operator::Sub], Self::parse_mul_expr)
    }

    fn parse_mul_expr(&mut self) -> Result<Expr, ()> {
        self.parse_binary_tier(
            &[Operator::Mul, Operator::Div, Operator::Mod],
            Self::parse_unary_expr,
        )
    }

    /// Shared left-associative fold for one precedence tier: parses a
    /// left-hand side via `next_tier`, then keeps consuming `(op, rhs)`
    /// pairs while the current token is one of `ops`.
    fn parse_binary_tier(
        &mut self,
        ops: &[Operator],
        next_tier: fn(&mut Self) -> Result<Expr, ()>,
    ) -> Result<Expr, ()> {
        let mut lhs = next_tier(self)?;
        loop {
            let op = match self.cur {
                Token::Operator(op) if ops.contains(&op) => op,
                _ => break,
            };
            self.advance();
            let rhs = next_tier(self)?;
            lhs = Expr::Binary {
                op: BinOp::from_operator(op).expect("tier operator always maps to a BinOp"),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// `("-" | "!") Value | Value` — note the operand of a unary prefix is
    /// a `Value`, not another `Unary`; `!-x` is therefore rejected, while
    /// `-(-x)` is accepted through the parenthesized-`Expr` arm of `Value`.
    fn parse_unary_expr(&mut self) -> Result<Expr, ()> {
        let op = match self.cur {
            Token::Operator(Operator::Sub) => UnOp::Neg,
            Token::Operator(Operator::LNot) => UnOp::Not,
            _ => return self.parse_value(),
        };
        self.advance();
        let opr = self.parse_value()?;
        Ok(Expr::Unary { op, opr: Box::new(opr) })
    }

    fn parse_value(&mut self) -> Result<Expr, ()> {
        match self.cur {
            Token::Integer(value) => {
                self.advance();
                Ok(Expr::Int(value))
            }
            Token::Id(name) => {
                self.advance();
                if self.at_other('(') {
                    self.parse_fun_call_args(name)
                } else {
                    Ok(Expr::Id(name))
                }
            }
            Token::Other('(') => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_other(')')?;
                Ok(expr)
            }
            _ => {
                self.error("expected a value (integer, identifier, call, or parenthesized expression)");
                Err(())
            }
        }
    }

    /// Parses `"(" [ Expr { "," Expr } ] ")"` given the callee name and the
    /// current token already positioned on `(`. Each argument is parsed and
    /// then the current token is consulted directly for `,` or `)` — the
    /// original's `ParseFunCall` calls `NextToken()` unconditionally right
    /// after each `ParseExpr()`, which skips past whatever token already
    /// follows the argument; that extra advance is not reproduced here.
    fn parse_fun_call_args(&mut self, name: firststep_util::Symbol) -> Result<Expr, ()> {
        self.advance(); // '('
        let mut args = Vec::new();
        if !self.at_other(')') {
            args.push(self.parse_expr()?);
            while self.at_other(',') {
                self.advance();
                args.push(self.parse_expr()?);
            }
        }
        self.expect_other(')')?;
        Ok(Expr::FunCall { name, args })
    }
}

#[cfg(test)]
mod tests {
    use firststep_util::{Handler, Symbol};

    use crate::ast::{BinOp, Expr, UnOp};
    use crate::parser::Parser;

    fn parse_expr_source(source: &str) -> (Result<Expr, ()>, Handler) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        let result = parser.parse_expr();
        (result, handler)
    }

    #[test]
    fn integer_literal() {
        let (result, handler) = parse_expr_source("42");
        assert!(!handler.has_errors());
        assert_eq!(result.unwrap(), Expr::Int(42));
    }

    #[test]
    fn bare_identifier() {
        let (result, _) = parse_expr_source("x");
        assert_eq!(result.unwrap(), Expr::Id(Symbol::intern("x")));
    }

    #[test]
    fn call_with_no_arguments() {
        let (result, handler) = parse_expr_source("input()");
        assert!(!handler.has_errors());
        match result.unwrap() {
            Expr::FunCall { name, args } => {
                assert_eq!(name, Symbol::intern("input"));
                assert!(args.is_empty());
            }
            other => panic!("expected a call, got {:?}", other),
        }
    }

    #[test]
    fn call_with_multiple_arguments_does_not_skip_a_token() {
        // Regression test for the original's extra-NextToken bug: both
        // arguments must parse even though each is itself a single token.
        let (result, handler) = parse_expr_source("f(1, 2, 3)");
        assert!(!handler.has_errors());
        match result.unwrap() {
            Expr::FunCall { args, .. } => assert_eq!(args.len(), 3),
            other => panic!("expected a call, got {:?}", other),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let (result, _) = parse_expr_source("1 + 2 * 3");
        match result.unwrap() {
            Expr::Binary { op: BinOp::Add, rhs, .. } => {
                assert!(matches!(*rhs, Expr::Binary { op: BinOp::Mul, .. }));
            }
            other => panic!("expected + at the top, got {:?}", other),
        }
    }

    #[test]
    fn negation_of_an_identifier() {
        let (result, handler) = parse_expr_source("-x");
        assert!(!handler.has_errors());
        assert!(matches!(result.unwrap(), Expr::Unary { op: UnOp::Neg, .. }));
    }

    #[test]
    fn logical_not_of_a_parenthesized_comparison() {
        let (result, handler) = parse_expr_source("!(a < b)");
        assert!(!handler.has_errors());
        assert!(matches!(result.unwrap(), Expr::Unary { op: UnOp::Not, .. }));
    }

    #[test]
    fn or_is_lower_precedence_than_and() {
        let (result, _) = parse_expr_source("a && b || c && d");
        match result.unwrap() {
            Expr::Binary { op: BinOp::LOr, lhs, rhs } => {
                assert!(matches!(*lhs, Expr::Binary { op: BinOp::LAnd, .. }));
                assert!(matches!(*rhs, Expr::Binary { op: BinOp::LAnd, .. }));
            }
            other => panic!("expected || at the top, got {:?}", other),
        }
    }

    #[test]
    fn unclosed_paren_is_a_syntax_error() {
        let (result, handler) = parse_expr_source("(1 + 2");
        assert!(result.is_err());
        assert!(handler.has_errors());
    }
}

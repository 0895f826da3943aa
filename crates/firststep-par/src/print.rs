//! Canonical AST pretty-printer (spec.md §8 property 2: "every AST
//! produced by the parser on input `S` re-printed in canonical form
//! re-parses to an equivalent AST"). Neither `faxc-par` nor
//! `original_source/` prints its own AST back to source, so this is
//! modeled directly on the AST's own variant shape — one function per
//! node, rather than adapted from an existing pretty-printer.
//!
//! Every `Binary`/`Unary` operand is wrapped in parentheses regardless of
//! its own precedence. This throws away "nicest possible" formatting, but
//! it means the printed precedence can never drift from the tree it came
//! from: a fully parenthesized operand always reparses as a `Value` (the
//! grammar's `"(" Expr ")"` arm) before precedence climbing gets a chance
//! to regroup it differently.

use std::fmt::Write as _;

use crate::ast::{BinOp, Block, ElseBranch, Expr, FunDef, IfStmt, Stmt, UnOp};

/// Prints every function definition in declaration order, one per line.
pub fn print_program(funcs: &[FunDef]) -> String {
    let mut out = String::new();
    for f in funcs {
        print_fun_def(f, &mut out);
        out.push('\n');
    }
    out
}

fn print_fun_def(f: &FunDef, out: &mut String) {
    write!(out, "{}(", f.name).unwrap();
    print_comma_list(&f.params, out, |p, out| write!(out, "{p}").unwrap());
    out.push_str(") ");
    print_block(&f.body, out);
}

fn print_block(b: &Block, out: &mut String) {
    out.push_str("{ ");
    for s in &b.stmts {
        print_stmt(s, out);
        out.push(' ');
    }
    out.push('}');
}

fn print_stmt(s: &Stmt, out: &mut String) {
    match s {
        Stmt::Define { name, expr } => {
            write!(out, "{name} := ").unwrap();
            print_expr(expr, out);
        }
        Stmt::Assign { name, expr } => {
            write!(out, "{name} = ").unwrap();
            print_expr(expr, out);
        }
        Stmt::If(if_stmt) => print_if(if_stmt, out),
        Stmt::Return { expr } => {
            out.push_str("return ");
            print_expr(expr, out);
        }
    }
}

fn print_if(s: &IfStmt, out: &mut String) {
    out.push_str("if ");
    print_expr(&s.cond, out);
    out.push(' ');
    print_block(&s.then_block, out);
    if let Some(branch) = &s.else_branch {
        out.push_str(" else ");
        match branch {
            ElseBranch::Block(b) => print_block(b, out),
            ElseBranch::If(i) => print_if(i, out),
        }
    }
}

fn print_expr(e: &Expr, out: &mut String) {
    match e {
        Expr::Int(v) => {
            write!(out, "{v}").unwrap();
        }
        Expr::Id(name) => {
            write!(out, "{name}").unwrap();
        }
        Expr::Unary { op, opr } => {
            out.push_str(match op {
                UnOp::Neg => "-",
                UnOp::Not => "!",
            });
            out.push('(');
            print_expr(opr, out);
            out.push(')');
        }
        Expr::Binary { op, lhs, rhs } => {
            out.push('(');
            print_expr(lhs, out);
            write!(out, " {} ", binop_spelling(*op)).unwrap();
            print_expr(rhs, out);
            out.push(')');
        }
        Expr::FunCall { name, args } => {
            write!(out, "{name}(").unwrap();
            print_comma_list(args, out, print_expr);
            out.push(')');
        }
    }
}

fn print_comma_list<T>(items: &[T], out: &mut String, mut print_one: impl FnMut(&T, &mut String)) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        print_one(item, out);
    }
}

fn binop_spelling(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Mod => "%",
        BinOp::Less => "<",
        BinOp::LessEq => "<=",
        BinOp::Eq => "==",
        BinOp::NotEq => "!=",
        BinOp::LAnd => "&&",
        BinOp::LOr => "||",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firststep_util::Handler;

    fn parse(source: &str) -> Vec<FunDef> {
        let handler = Handler::new();
        let mut parser = crate::Parser::new(source, &handler);
        parser.parse_program().expect("source must parse")
    }

    #[test]
    fn prints_a_minimal_function() {
        let funcs = parse("main() { return 0 }");
        assert_eq!(print_program(&funcs), "main() { return 0 }\n");
    }

    #[test]
    fn prints_parameters_and_calls() {
        let funcs = parse("add(a, b) { return a + b }");
        let printed = print_program(&funcs);
        assert!(printed.starts_with("add(a, b) {"));
        assert!(printed.contains("(a + b)"));
    }

    #[test]
    fn every_binary_operand_is_parenthesized() {
        let funcs = parse("main() { return 1 + 2 * 3 }");
        assert_eq!(print_program(&funcs), "main() { return (1 + (2 * 3)) }\n");
    }
}

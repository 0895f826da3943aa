//! Tree-walking interpreter for firststep (spec.md §4.3).
//!
//! Two visitors consume the same [`firststep_par::ast`] tree — this one,
//! and `firststep_ir`'s lowering pass (spec.md §9, "Visitor with two back
//! ends"). Evaluation never builds an intermediate representation; it
//! walks statements and expressions directly, threading values through
//! [`ScopeTree`].
//!
//! Absence of a value (`None`/`Err`) always means a diagnostic has
//! already been reported through the shared [`Handler`] — callers
//! propagate it with `?` and never re-report.

mod scope;

use std::collections::HashMap;
use std::io::{self, Read, Write};

use firststep_par::ast::{BinOp, Block, ElseBranch, Expr, FunDef, IfStmt, Stmt, UnOp};
use firststep_util::{Handler, Span, Stage, Symbol};

use scope::ScopeTree;

/// Evaluates a parsed firststep program: registers function definitions,
/// then runs `main`.
///
/// Generic over its I/O streams so the two built-ins (`input`, `print`)
/// can be pointed at real stdio in production and at in-memory buffers in
/// tests.
pub struct Interpreter<'a, R: Read, W: Write> {
    funcs: HashMap<Symbol, FunDef>,
    handler: &'a Handler,
    scopes: ScopeTree,
    stdin: R,
    stdout: W,
    sym_input: Symbol,
    sym_print: Symbol,
}

impl<'a> Interpreter<'a, io::StdinLock<'static>, io::StdoutLock<'static>> {
    /// An interpreter wired to the process's real standard streams.
    pub fn new(handler: &'a Handler) -> Self {
        Self::with_io(handler, io::stdin().lock(), io::stdout().lock())
    }
}

impl<'a, R: Read, W: Write> Interpreter<'a, R, W> {
    pub fn with_io(handler: &'a Handler, stdin: R, stdout: W) -> Self {
        Self {
            funcs: HashMap::new(),
            handler,
            scopes: ScopeTree::new(),
            stdin,
            stdout,
            sym_input: Symbol::intern("input"),
            sym_print: Symbol::intern("print"),
        }
    }

    fn report(&self, message: impl Into<String>) {
        self.handler.error(Stage::Interpreter, message, Span::DUMMY);
    }

    /// Registers a top-level function definition. Fails if a function by
    /// that name was already registered (spec.md §4.3).
    pub fn register(&mut self, f: FunDef) -> Result<(), ()> {
        if self.funcs.contains_key(&f.name) {
            self.report("function has already been defined");
            return Err(());
        }
        self.funcs.insert(f.name, f);
        Ok(())
    }

    /// Looks up `main` and evaluates it with no arguments (spec.md §6).
    /// Returns `None` if `main` doesn't exist or evaluation failed; both
    /// cases have already reported a diagnostic.
    pub fn eval_main(&mut self) -> Option<i32> {
        let main_fn = match self.funcs.get(&Symbol::intern("main")) {
            Some(f) => f.clone(),
            None => {
                self.report("'main' function not found");
                return None;
            }
        };
        self.call_user_function(&main_fn, Vec::new())
    }

    fn call_user_function(&mut self, f: &FunDef, args: Vec<i32>) -> Option<i32> {
        if f.params.len() != args.len() {
            self.report("argument count mismatch");
            return None;
        }

        self.scopes.push(true);
        for (param, arg) in f.params.iter().zip(args) {
            if self.scopes.bind_param(*param, arg).is_err() {
                self.report("redefinition of argument");
                self.scopes.pop();
                return None;
            }
        }
        self.scopes.declare_return_slot();

        let body_ok = self.eval_block(&f.body).is_some();
        let ret = if body_ok { self.scopes.read_return() } else { None };
        self.scopes.pop();

        match ret {
            Some(v) => Some(v),
            None => {
                if body_ok {
                    self.report("function has no return value");
                }
                None
            }
        }
    }

    fn eval_block(&mut self, block: &Block) -> Option<()> {
        self.scopes.push(false);
        let mut result = Some(());
        for stmt in &block.stmts {
            if self.eval_stmt(stmt).is_none() {
                result = None;
                break;
            }
        }
        self.scopes.pop();
        result
    }

    fn eval_stmt(&mut self, stmt: &Stmt) -> Option<()> {
        match stmt {
            Stmt::Define { name, expr } => {
                let v = self.eval_expr(expr)?;
                if self.scopes.define(*name, v).is_err() {
                    self.report("symbol has already been defined");
                    return None;
                }
                Some(())
            }
            Stmt::Assign { name, expr } => {
                let v = self.eval_expr(expr)?;
                if !self.scopes.assign(*name, v) {
                    self.report("symbol has not been defined");
                    return None;
                }
                Some(())
            }
            Stmt::If(if_stmt) => self.eval_if(if_stmt),
            Stmt::Return { expr } => {
                let v = self.eval_expr(expr)?;
                self.scopes.write_return(v);
                Some(())
            }
        }
    }

    fn eval_if(&mut self, s: &IfStmt) -> Option<()> {
        let cond = self.eval_expr(&s.cond)?;
        if cond != 0 {
            self.eval_block(&s.then_block)
        } else {
            match &s.else_branch {
                Some(ElseBranch::Block(b)) => self.eval_block(b),
                Some(ElseBranch::If(i)) => self.eval_if(i),
                None => Some(()),
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Option<i32> {
        match expr {
            Expr::Int(v) => Some(*v),
            Expr::Id(name) => {
                let v = self.scopes.lookup(*name);
                if v.is_none() {
                    self.report("symbol has not been defined");
                }
                v
            }
            Expr::Unary { op, opr } => {
                let v = self.eval_expr(opr)?;
                Some(match op {
                    UnOp::Neg => v.wrapping_neg(),
                    UnOp::Not => i32::from(v == 0),
                })
            }
            Expr::Binary { op, lhs, rhs } => self.eval_binary(*op, lhs, rhs),
            Expr::FunCall { name, args } => self.eval_call(*name, args),
        }
    }

    fn eval_binary(&mut self, op: BinOp, lhs: &Expr, rhs: &Expr) -> Option<i32> {
        match op {
            // Short-circuit: the lhs value is returned directly without
            // evaluating rhs at all (spec.md §4.3, §9).
            BinOp::LAnd => {
                let l = self.eval_expr(lhs)?;
                if l == 0 {
                    return Some(l);
                }
                self.eval_expr(rhs)
            }
            BinOp::LOr => {
                let l = self.eval_expr(lhs)?;
                if l != 0 {
                    return Some(l);
                }
                self.eval_expr(rhs)
            }
            _ => {
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                Some(match op {
                    BinOp::Add => l.wrapping_add(r),
                    BinOp::Sub => l.wrapping_sub(r),
                    BinOp::Mul => l.wrapping_mul(r),
                    // Division/modulus by zero are undefined per spec.md
                    // §4.3 — we let the host trap rather than guard it.
                    BinOp::Div => l / r,
                    BinOp::Mod => l % r,
                    BinOp::Less => i32::from(l < r),
                    BinOp::LessEq => i32::from(l <= r),
                    BinOp::Eq => i32::from(l == r),
                    BinOp::NotEq => i32::from(l != r),
                    BinOp::LAnd | BinOp::LOr => unreachable!("handled above"),
                })
            }
        }
    }

    fn eval_call(&mut self, name: Symbol, args: &[Expr]) -> Option<i32> {
        // Built-ins take precedence over user functions of the same name
        // (the opposite order from IR generation — spec.md §9, REDESIGN
        // FLAG #4 — preserved deliberately on both sides).
        if name == self.sym_input {
            if !args.is_empty() {
                self.report("argument count mismatch");
                return None;
            }
            return Some(self.builtin_input());
        }
        if name == self.sym_print {
            if args.len() != 1 {
                self.report("argument count mismatch");
                return None;
            }
            let v = self.eval_expr(&args[0])?;
            self.builtin_print(v);
            return Some(0);
        }

        let fun_def = match self.funcs.get(&name) {
            Some(f) => f.clone(),
            None => {
                self.report("function not found");
                return None;
            }
        };
        let mut vals = Vec::with_capacity(args.len());
        for a in args {
            vals.push(self.eval_expr(a)?);
        }
        self.call_user_function(&fun_def, vals)
    }

    /// Reads one whitespace-delimited integer token from stdin. Malformed
    /// or exhausted input yields `0` rather than failing the program —
    /// spec.md leaves `input`'s error behavior unspecified, and silently
    /// defaulting matches the original's `std::cin >> x` semantics on a
    /// failed extraction.
    fn builtin_input(&mut self) -> i32 {
        let mut byte = [0u8; 1];
        loop {
            match self.stdin.read(&mut byte) {
                Ok(0) => return 0,
                Ok(_) if !byte[0].is_ascii_whitespace() => break,
                Ok(_) => continue,
                Err(_) => return 0,
            }
        }
        let mut buf = vec![byte[0]];
        loop {
            match self.stdin.read(&mut byte) {
                Ok(0) => break,
                Ok(_) if byte[0].is_ascii_whitespace() => break,
                Ok(_) => buf.push(byte[0]),
                Err(_) => break,
            }
        }
        std::str::from_utf8(&buf)
            .ok()
            .and_then(|s| s.parse::<i32>().ok())
            .unwrap_or(0)
    }

    fn builtin_print(&mut self, v: i32) {
        let _ = writeln!(self.stdout, "{v}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firststep_par::Parser;
    use std::io::Cursor;

    fn run(source: &str, input: &str) -> (Option<i32>, Handler, String) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        let funcs = parser.parse_program().expect("source must parse");
        let mut output = Vec::new();
        let result = {
            let mut interp = Interpreter::with_io(&handler, Cursor::new(input.as_bytes()), &mut output);
            for f in funcs {
                interp.register(f).unwrap();
            }
            interp.eval_main()
        };
        let output = String::from_utf8(output).unwrap();
        (result, handler, output)
    }

    #[test]
    fn minimal_main_returns_its_constant() {
        let (result, handler, _) = run("main() { return 0 }", "");
        assert_eq!(result, Some(0));
        assert!(!handler.has_errors());
    }

    #[test]
    fn recursive_function_calls_and_arithmetic() {
        let source = "fact(n) {\n\
             if n == 0 { return 1 }\n\
             return n * fact(n - 1)\n\
             }\n\
             main() { return fact(5) }";
        let (result, handler, _) = run(source, "");
        assert_eq!(result, Some(120));
        assert!(!handler.has_errors());
    }

    #[test]
    fn short_circuit_and_skips_rhs_side_effect() {
        let source = "main() {\n\
             x := 0 && print(99)\n\
             return x\n\
             }";
        let (result, handler, output) = run(source, "");
        assert_eq!(result, Some(0));
        assert!(!handler.has_errors());
        assert!(output.is_empty(), "rhs of a short-circuited && must not run");
    }

    #[test]
    fn short_circuit_or_skips_rhs_side_effect() {
        let source = "main() {\n\
             x := 5 || print(99)\n\
             return x\n\
             }";
        let (result, _, output) = run(source, "");
        assert_eq!(result, Some(5));
        assert!(output.is_empty(), "rhs of a short-circuited || must not run");
    }

    #[test]
    fn assign_does_not_reach_across_a_function_call() {
        // spec.md §8 property 5: g defines y, calls f(y); f assigns its
        // own parameter x, which must not alter g's y.
        let source = "f(x) { x = 1 return x }\n\
             g() { y := 10 z := f(y) return y }\n\
             main() { return g() }";
        let (result, handler, _) = run(source, "");
        assert_eq!(result, Some(10));
        assert!(!handler.has_errors());
    }

    #[test]
    fn redefinition_in_the_same_scope_is_an_error() {
        let (result, handler, _) = run("main() { x := 1 x := 2 return x }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn assigning_an_undefined_name_is_an_error() {
        let (result, handler, _) = run("main() { x = 1 return x }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn reading_an_undefined_name_is_an_error() {
        let (result, handler, _) = run("main() { return x }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn calling_with_the_wrong_argument_count_is_an_error() {
        let source = "add(a, b) { return a + b }\nmain() { return add(1) }";
        let (result, handler, _) = run(source, "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn calling_an_unknown_function_is_an_error() {
        let (result, handler, _) = run("main() { return nope() }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn missing_main_is_an_error() {
        let (result, handler, _) = run("other() { return 0 }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn a_function_falling_off_the_end_without_returning_is_an_error() {
        let (result, handler, _) = run("main() { x := 1 }", "");
        assert_eq!(result, None);
        assert_eq!(handler.error_num(Stage::Interpreter), 1);
    }

    #[test]
    fn print_writes_the_argument_and_returns_zero() {
        let (result, _, output) = run("main() { x := print(7) return x }", "");
        assert_eq!(result, Some(0));
        assert_eq!(output, "7\n");
    }

    #[test]
    fn input_reads_one_whitespace_delimited_integer() {
        let (result, handler, _) = run("main() { return input() }", "  42 \n");
        assert_eq!(result, Some(42));
        assert!(!handler.has_errors());
    }

    #[test]
    fn if_else_chain_picks_the_right_branch() {
        let source = "classify(n) {\n\
             if n < 0 { return -1 }\n\
             if n == 0 { return 0 }\n\
             return 1\n\
             }\n\
             main() { return classify(-5) }";
        let (result, _, _) = run(source, "");
        assert_eq!(result, Some(-1));
    }
}

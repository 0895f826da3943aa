//! AST → IR lowering (spec.md §4.4).
//!
//! The second of the two visitors over [`firststep_par::ast`] (spec.md
//! §9) — same tree `firststep_interp` walks, different job: instead of
//! producing a value it produces [`crate::ir::Instruction`]s into the
//! function currently being lowered.
//!
//! `VirtReg`/`Label` ids are drawn from counters living on [`IrGen`]
//! itself, not process-global statics — each compiled module gets ids
//! starting fresh from zero (spec.md §9's redesign away from the
//! original's `static std::size_t next_id_` counters on `VirtRegVal` and
//! `LabelVal`).

use std::collections::HashSet;

use firststep_par::ast::{self, BinOp as AstBinOp, UnOp as AstUnOp};
use firststep_util::{Handler, Span, Stage, Symbol};

use crate::ir::{BinOp, BranchKind, FunctionDef, Instruction, Label, Module, UnOp, Val, VirtReg};
use crate::scope::Env;

pub struct IrGen<'a> {
    module: Module,
    /// Names and arities of user functions declared so far, including the
    /// one currently being lowered — lets a function's own body resolve
    /// calls to itself (recursion) before the function is fully lowered
    /// and committed into `module.funcs`.
    signatures: HashSet<Symbol>,
    arities: std::collections::HashMap<Symbol, usize>,
    cur_insts: Vec<Instruction>,
    cur_vregs: Vec<VirtReg>,
    scopes: Env,
    next_vreg: u32,
    next_label: u32,
    handler: &'a Handler,
}

impl<'a> IrGen<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            module: Module::new(),
            signatures: HashSet::new(),
            arities: std::collections::HashMap::new(),
            cur_insts: Vec::new(),
            cur_vregs: Vec::new(),
            scopes: Env::new(),
            next_vreg: 0,
            next_label: 0,
            handler,
        }
    }

    fn report(&self, message: impl Into<String>) {
        self.handler.error(Stage::IrGen, message, Span::DUMMY);
    }

    fn add_vreg(&mut self) -> Val {
        let vr = VirtReg(self.next_vreg);
        self.next_vreg += 1;
        self.cur_vregs.push(vr);
        Val::VirtReg(vr)
    }

    fn new_label(&mut self) -> Label {
        let l = Label(self.next_label);
        self.next_label += 1;
        l
    }

    fn push(&mut self, inst: Instruction) {
        self.cur_insts.push(inst);
    }

    /// Lowers every function in a parsed program. Keeps going after a
    /// per-function failure so later functions still get diagnosed, but
    /// returns `Err` overall if any of them failed.
    pub fn lower_program(&mut self, funcs: &[ast::FunDef]) -> Result<(), ()> {
        let mut ok = true;
        for f in funcs {
            if self.lower_fun_def(f).is_err() {
                ok = false;
            }
        }
        if ok {
            Ok(())
        } else {
            Err(())
        }
    }

    /// Consumes the generator, returning the module it built.
    pub fn into_module(self) -> Module {
        self.module
    }

    fn lower_fun_def(&mut self, f: &ast::FunDef) -> Result<(), ()> {
        if !self.signatures.insert(f.name) {
            self.report("function has already been defined");
            return Err(());
        }
        self.arities.insert(f.name, f.params.len());

        self.cur_insts = Vec::new();
        self.cur_vregs = Vec::new();
        self.scopes.push();
        for (i, param) in f.params.iter().enumerate() {
            self.scopes.bind_param(*param, Val::ArgRef(i));
        }

        let ok = self.lower_block(&f.body).is_ok();
        self.scopes.pop();

        let func = FunctionDef {
            name: f.name,
            arg_count: f.params.len(),
            instructions: std::mem::take(&mut self.cur_insts),
            vregs: std::mem::take(&mut self.cur_vregs),
            is_library: false,
        };
        self.module.funcs.insert(f.name, func);

        if ok {
            Ok(())
        } else {
            Err(())
        }
    }

    fn lower_block(&mut self, b: &ast::Block) -> Result<(), ()> {
        self.scopes.push();
        let mut result = Ok(());
        for s in &b.stmts {
            if self.lower_stmt(s).is_err() {
                result = Err(());
                break;
            }
        }
        self.scopes.pop();
        result
    }

    fn lower_stmt(&mut self, s: &ast::Stmt) -> Result<(), ()> {
        match s {
            ast::Stmt::Define { name, expr } => {
                let v = self.lower_expr(expr)?;
                let dest = self.add_vreg();
                if self.scopes.define(*name, dest).is_err() {
                    self.report("symbol has already been defined");
                    return Err(());
                }
                self.push(Instruction::Assign { dest, src: v });
                Ok(())
            }
            ast::Stmt::Assign { name, expr } => {
                let v = self.lower_expr(expr)?;
                let dest = match self.scopes.lookup(*name) {
                    Some(d) => d,
                    None => {
                        self.report("symbol has not been defined");
                        return Err(());
                    }
                };
                self.push(Instruction::Assign { dest, src: v });
                Ok(())
            }
            ast::Stmt::If(if_stmt) => self.lower_if(if_stmt),
            ast::Stmt::Return { expr } => {
                let v = self.lower_expr(expr)?;
                self.push(Instruction::Return { val: v });
                Ok(())
            }
        }
    }

    fn lower_if(&mut self, s: &ast::IfStmt) -> Result<(), ()> {
        let cond = self.lower_expr(&s.cond)?;
        let false_label = self.new_label();
        let end_label = s.else_branch.as_ref().map(|_| self.new_label());

        self.push(Instruction::Branch {
            kind: BranchKind::Beqz,
            cond,
            target: false_label,
        });
        self.lower_block(&s.then_block)?;
        if let Some(end) = end_label {
            self.push(Instruction::Jump { target: end });
        }
        self.push(Instruction::Label(false_label));

        if let Some(end) = end_label {
            match &s.else_branch {
                Some(ast::ElseBranch::Block(b)) => self.lower_block(b)?,
                Some(ast::ElseBranch::If(i)) => self.lower_if(i)?,
                None => unreachable!("end_label only set when an else branch exists"),
            }
            self.push(Instruction::Label(end));
        }
        Ok(())
    }

    fn lower_expr(&mut self, e: &ast::Expr) -> Result<Val, ()> {
        match e {
            ast::Expr::Int(v) => Ok(Val::Int(*v)),
            ast::Expr::Id(name) => self.scopes.lookup(*name).ok_or_else(|| {
                self.report("symbol has not been defined");
            }),
            ast::Expr::Unary { op, opr } => {
                let v = self.lower_expr(opr)?;
                let dest = self.add_vreg();
                let op = match op {
                    AstUnOp::Neg => UnOp::Neg,
                    AstUnOp::Not => UnOp::Not,
                };
                self.push(Instruction::Unary { op, dest, opr: v });
                Ok(dest)
            }
            ast::Expr::Binary { op, lhs, rhs } => self.lower_binary(*op, lhs, rhs),
            ast::Expr::FunCall { name, args } => self.lower_call(*name, args),
        }
    }

    fn lower_binary(&mut self, op: AstBinOp, lhs: &ast::Expr, rhs: &ast::Expr) -> Result<Val, ()> {
        match op {
            // Short-circuit lowering reuses the lhs value as the merge
            // destination: whichever operand decided the result is
            // assigned back into itself, and that same value is yielded.
            // This is a deliberate pseudo-phi (spec.md §4.4, §9) — not
            // an accident to "fix" by introducing a fresh register.
            AstBinOp::LAnd | AstBinOp::LOr => {
                let lhs_val = self.lower_expr(lhs)?;
                let end = self.new_label();
                let kind = if op == AstBinOp::LAnd {
                    BranchKind::Beqz
                } else {
                    BranchKind::Bnez
                };
                self.push(Instruction::Branch { kind, cond: lhs_val, target: end });
                let rhs_val = self.lower_expr(rhs)?;
                self.push(Instruction::Assign { dest: lhs_val, src: rhs_val });
                self.push(Instruction::Label(end));
                Ok(lhs_val)
            }
            _ => {
                let lhs_val = self.lower_expr(lhs)?;
                let rhs_val = self.lower_expr(rhs)?;
                let dest = self.add_vreg();
                let bop = match op {
                    AstBinOp::Add => BinOp::Add,
                    AstBinOp::Sub => BinOp::Sub,
                    AstBinOp::Mul => BinOp::Mul,
                    AstBinOp::Div => BinOp::Div,
                    AstBinOp::Mod => BinOp::Mod,
                    AstBinOp::Less => BinOp::Less,
                    AstBinOp::LessEq => BinOp::LessEq,
                    AstBinOp::Eq => BinOp::Eq,
                    AstBinOp::NotEq => BinOp::NotEq,
                    AstBinOp::LAnd | AstBinOp::LOr => unreachable!("handled above"),
                };
                self.push(Instruction::Binary { op: bop, dest, lhs: lhs_val, rhs: rhs_val });
                Ok(dest)
            }
        }
    }

    fn lower_call(&mut self, name: Symbol, args: &[ast::Expr]) -> Result<Val, ()> {
        // User functions are resolved before library built-ins here —
        // the opposite order from the interpreter, which checks
        // built-ins first. Both are preserved deliberately (spec.md §9,
        // REDESIGN FLAG #4) rather than silently unified.
        let arity = if let Some(&a) = self.arities.get(&name) {
            a
        } else if let Some(f) = self.module.lib_funcs.get(&name) {
            f.arg_count
        } else {
            self.report("function not found");
            return Err(());
        };
        if arity != args.len() {
            self.report("argument count mismatch");
            return Err(());
        }

        let mut vals = Vec::with_capacity(args.len());
        for a in args {
            vals.push(self.lower_expr(a)?);
        }
        let dest = self.add_vreg();
        self.push(Instruction::Call { dest, callee: name, args: vals });
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firststep_par::Parser;

    fn lower(source: &str) -> (Result<(), ()>, Handler, Module) {
        let handler = Handler::new();
        let mut parser = Parser::new(source, &handler);
        let funcs = parser.parse_program().expect("source must parse");
        let mut gen = IrGen::new(&handler);
        let result = gen.lower_program(&funcs);
        (result, handler, gen.into_module())
    }

    #[test]
    fn minimal_main_lowers_to_a_single_return() {
        let (result, handler, module) = lower("main() { return 0 }");
        assert!(result.is_ok());
        assert!(!handler.has_errors());
        let main = &module.funcs[&Symbol::intern("main")];
        assert_eq!(main.instructions.len(), 1);
        assert!(matches!(main.instructions[0], Instruction::Return { val: Val::Int(0) }));
    }

    #[test]
    fn recursive_call_resolves_against_its_own_not_yet_committed_signature() {
        let source = "fact(n) {\n\
             if n == 0 { return 1 }\n\
             return n * fact(n - 1)\n\
             }\n\
             main() { return fact(5) }";
        let (result, handler, module) = lower(source);
        assert!(result.is_ok());
        assert!(!handler.has_errors());
        assert!(module.funcs.contains_key(&Symbol::intern("fact")));
    }

    #[test]
    fn define_allocates_a_fresh_vreg_and_records_it_on_the_function() {
        let (result, _, module) = lower("main() { x := 1 return x }");
        assert!(result.is_ok());
        let main = &module.funcs[&Symbol::intern("main")];
        assert_eq!(main.vregs.len(), 1);
    }

    #[test]
    fn short_circuit_and_reuses_the_lhs_register_as_the_yielded_value() {
        let (result, _, module) = lower("main() { x := 0 && 1 return x }");
        assert!(result.is_ok());
        let main = &module.funcs[&Symbol::intern("main")];
        let branch = main
            .instructions
            .iter()
            .find_map(|i| match i {
                Instruction::Branch { cond, .. } => Some(*cond),
                _ => None,
            })
            .expect("expected a branch for &&'s short circuit");
        let assign = main
            .instructions
            .iter()
            .find_map(|i| match i {
                Instruction::Assign { dest, .. } => Some(*dest),
                _ => None,
            })
            .expect("expected the merge assign");
        assert_eq!(branch, assign, "merge assign must target the same Val the branch tested");
    }

    #[test]
    fn assigning_an_undefined_name_is_an_error() {
        let (result, handler, _) = lower("main() { x = 1 return x }");
        assert!(result.is_err());
        assert_eq!(handler.error_num(Stage::IrGen), 1);
    }

    #[test]
    fn redefining_a_function_is_an_error() {
        let (result, handler, _) = lower("f() { return 0 }\nf() { return 1 }\nmain() { return f() }");
        assert!(result.is_err());
        assert_eq!(handler.error_num(Stage::IrGen), 1);
    }

    #[test]
    fn wrong_argument_count_is_an_error() {
        let (result, handler, _) = lower("add(a, b) { return a + b }\nmain() { return add(1) }");
        assert!(result.is_err());
        assert_eq!(handler.error_num(Stage::IrGen), 1);
    }

    #[test]
    fn calling_an_undeclared_function_is_an_error() {
        let (result, handler, _) = lower("main() { return nope() }");
        assert!(result.is_err());
        assert_eq!(handler.error_num(Stage::IrGen), 1);
    }

    #[test]
    fn vreg_ids_restart_from_zero_per_module_instance() {
        let (_, _, _) = lower("main() { x := 1 return x }");
        let (_, _, module2) = lower("main() { y := 1 return y }");
        let main2 = &module2.funcs[&Symbol::intern("main")];
        assert_eq!(main2.vregs[0], VirtReg(0), "a fresh IrGen must not see state from a prior one");
    }
}

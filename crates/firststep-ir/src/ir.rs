//! IR data model for firststep (spec.md §3).
//!
//! A flat per-function instruction list, not a basic-block/CFG shape:
//! `Branch`/`Jump`/`Label` carry control flow directly as instructions,
//! mirroring the lowering in [`crate::lower`] one statement at a time.
//! The assembly emitter (`firststep-gen`) is a separate consumer of this
//! same data — IR nodes carry no emission logic of their own, unlike the
//! original's `InstBase`/`ValueBase` which bundled a node with its own
//! `Dump` method (spec.md §9's component split).

use indexmap::IndexMap;

use firststep_util::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtReg(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label(pub u32);

/// An operand: either a value already materialized somewhere (a virtual
/// register, an argument slot), a jump target, or a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Val {
    VirtReg(VirtReg),
    ArgRef(usize),
    Label(Label),
    Int(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// Branch if the condition is nonzero.
    Bnez,
    /// Branch if the condition is zero.
    Beqz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    LessEq,
    Eq,
    NotEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

/// One IR instruction. `&&`/`||` never appear here — the lowering pass
/// desugars them into `Branch`/`Assign`/`Label` sequences before they
/// reach this level (spec.md §4.4, §9).
#[derive(Debug, Clone)]
pub enum Instruction {
    Assign { dest: Val, src: Val },
    Branch { kind: BranchKind, cond: Val, target: Label },
    Jump { target: Label },
    Label(Label),
    Call { dest: Val, callee: Symbol, args: Vec<Val> },
    Return { val: Val },
    Binary { op: BinOp, dest: Val, lhs: Val, rhs: Val },
    Unary { op: UnOp, dest: Val, opr: Val },
}

/// One lowered function: its instructions plus the bookkeeping the
/// assembly emitter needs to lay out a stack frame (spec.md §4.5).
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: Symbol,
    pub arg_count: usize,
    pub instructions: Vec<Instruction>,
    /// Every virtual register this function defines, in definition
    /// order. The emitter uses this ordering to assign each one a dense,
    /// per-function stack slot — `VirtReg` ids themselves are drawn from
    /// a module-wide counter and are not contiguous within one function.
    pub vregs: Vec<VirtReg>,
    /// Library functions (`input`, `print`) have no body: they are
    /// declared but never lowered, and the emitter leaves calls to them
    /// as plain `call` instructions for the host runtime to resolve.
    pub is_library: bool,
}

impl FunctionDef {
    pub fn new(name: Symbol, arg_count: usize) -> Self {
        Self {
            name,
            arg_count,
            instructions: Vec::new(),
            vregs: Vec::new(),
            is_library: false,
        }
    }

    pub fn library(name: Symbol, arg_count: usize) -> Self {
        Self {
            is_library: true,
            ..Self::new(name, arg_count)
        }
    }

    pub fn push(&mut self, inst: Instruction) {
        self.instructions.push(inst);
    }
}

/// A lowered program: every user-defined function plus the two built-in
/// declarations (spec.md §1, §4.3) that calls may resolve against.
#[derive(Debug, Clone)]
pub struct Module {
    /// Keyed by `IndexMap` rather than a plain hash map so the emitter
    /// can walk functions in declaration order, giving reproducible
    /// assembly output for the same source.
    pub funcs: IndexMap<Symbol, FunctionDef>,
    pub lib_funcs: IndexMap<Symbol, FunctionDef>,
}

impl Module {
    pub fn new() -> Self {
        let mut lib_funcs = IndexMap::new();
        lib_funcs.insert(Symbol::intern("input"), FunctionDef::library(Symbol::intern("input"), 0));
        lib_funcs.insert(Symbol::intern("print"), FunctionDef::library(Symbol::intern("print"), 1));
        Self {
            funcs: IndexMap::new(),
            lib_funcs,
        }
    }
}

impl Default for Module {
    fn default() -> Self {
        Self::new()
    }
}

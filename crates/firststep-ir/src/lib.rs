//! firststep-ir - IR data model and AST-to-IR lowering (spec.md §3, §4.4).
//!
//! Sits between the parser and the assembly emitter on the compile path
//! (spec.md §2): [`lower::IrGen`] walks the same AST `firststep_interp`
//! walks, but instead of producing values it produces a [`ir::Module`] of
//! flat, linear [`ir::Instruction`] lists — no basic blocks, no control
//! flow graph, no optimization passes (spec.md's Non-goals rule those
//! out; `firststep-gen` emits straight from this as-is).

pub mod ir;
mod lower;
mod scope;

pub use ir::{BinOp, BranchKind, FunctionDef, Instruction, Label, Module, UnOp, Val, VirtReg};
pub use lower::IrGen;

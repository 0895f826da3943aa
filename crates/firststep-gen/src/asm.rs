//! RISC-V 32 assembly emission (spec.md §4.5).
//!
//! Deliberately not a register allocator: every virtual register is
//! spilled to a fixed stack slot for the life of the function, and every
//! operation routes through two scratch registers, `t0` (the running
//! result) and `t1` (the left operand, held across the right operand's
//! evaluation). Parameters live in callee-saved `s`-registers for the
//! whole function body instead of being reloaded per use.
//!
//! `AsmGenerator::new` (kept from the teacher's shape) starts as a bare
//! `output: String` accumulator; the `reg_alloc`/`Location` pieces it
//! also carried made sense for a real allocator and have no counterpart
//! in this spill-everything scheme, so they're gone here.

use std::collections::HashMap;
use std::fmt::Write as _;

use firststep_ir::{BinOp, BranchKind, FunctionDef, Instruction, Module, UnOp, Val, VirtReg};

use crate::error::{CodeGenError, Result};

pub struct AsmGenerator {
    output: String,
}

impl AsmGenerator {
    pub fn new() -> Self {
        Self { output: String::new() }
    }

    /// Emits every user-defined function in `module`. Library functions
    /// (`input`, `print`) have no body to emit — the host runtime
    /// supplies them, and calls to them are just `call input`/`call
    /// print` like any other callee.
    pub fn generate_module(mut self, module: &Module) -> Result<String> {
        for func in module.funcs.values() {
            self.generate_function(func, module)?;
        }
        Ok(self.output)
    }

    fn generate_function(&mut self, f: &FunctionDef, module: &Module) -> Result<()> {
        let slot_of: HashMap<VirtReg, usize> =
            f.vregs.iter().enumerate().map(|(i, &vr)| (vr, i)).collect();
        let frame = frame_size(f.arg_count, f.vregs.len());

        writeln!(self.output, ".text").unwrap();
        writeln!(self.output, ".globl {}", f.name).unwrap();
        writeln!(self.output, "{}:", f.name).unwrap();
        self.emit_prologue(f, frame);
        for inst in &f.instructions {
            self.emit_instruction(inst, f, frame, &slot_of, module)?;
        }
        Ok(())
    }

    fn emit_prologue(&mut self, f: &FunctionDef, frame: u32) {
        writeln!(self.output, "  addi sp, sp, -{frame}").unwrap();
        writeln!(self.output, "  sw ra, {}(sp)", frame - 4).unwrap();
        for i in 0..f.arg_count {
            let save_off = frame - 4 * (i as u32 + 2);
            writeln!(self.output, "  sw s{i}, {save_off}(sp)").unwrap();
            writeln!(self.output, "  mv s{i}, a{i}").unwrap();
        }
    }

    fn emit_epilogue(&mut self, f: &FunctionDef, frame: u32) {
        writeln!(self.output, "  mv a0, t0").unwrap();
        for i in 0..f.arg_count {
            let save_off = frame - 4 * (i as u32 + 2);
            writeln!(self.output, "  lw s{i}, {save_off}(sp)").unwrap();
        }
        writeln!(self.output, "  lw ra, {}(sp)", frame - 4).unwrap();
        writeln!(self.output, "  addi sp, sp, {frame}").unwrap();
        writeln!(self.output, "  ret").unwrap();
    }

    /// Materializes `v` into `t0`.
    fn read_into_t0(&mut self, v: Val, slot_of: &HashMap<VirtReg, usize>) -> Result<()> {
        match v {
            Val::Int(n) => {
                writeln!(self.output, "  li t0, {n}").unwrap();
            }
            Val::VirtReg(vr) => {
                let idx = slot_of
                    .get(&vr)
                    .ok_or(CodeGenError::UnregisteredVirtReg(vr.0))?;
                writeln!(self.output, "  lw t0, {}(sp)", idx * 4).unwrap();
            }
            Val::ArgRef(i) => {
                writeln!(self.output, "  mv t0, s{i}").unwrap();
            }
            Val::Label(_) => unreachable!("a Label is never read as a value"),
        }
        Ok(())
    }

    /// Writes `t0` into `dest`. Writing into a constant (`Val::Int`) is a
    /// no-op: short-circuit lowering can in principle reuse a constant
    /// lhs as an assign destination (spec.md §4.4, §9), and a constant
    /// simply isn't addressable — there is nowhere to put the value.
    fn write_from_t0(&mut self, dest: Val, slot_of: &HashMap<VirtReg, usize>) -> Result<()> {
        match dest {
            Val::VirtReg(vr) => {
                let idx = slot_of
                    .get(&vr)
                    .ok_or(CodeGenError::UnregisteredVirtReg(vr.0))?;
                writeln!(self.output, "  sw t0, {}(sp)", idx * 4).unwrap();
            }
            Val::ArgRef(i) => {
                writeln!(self.output, "  mv s{i}, t0").unwrap();
            }
            Val::Int(_) => {}
            Val::Label(_) => unreachable!("a Label is never an assign destination"),
        }
        Ok(())
    }

    fn emit_instruction(
        &mut self,
        inst: &Instruction,
        f: &FunctionDef,
        frame: u32,
        slot_of: &HashMap<VirtReg, usize>,
        module: &Module,
    ) -> Result<()> {
        match inst {
            Instruction::Assign { dest, src } => {
                self.read_into_t0(*src, slot_of)?;
                self.write_from_t0(*dest, slot_of)?;
            }
            Instruction::Branch { kind, cond, target } => {
                self.read_into_t0(*cond, slot_of)?;
                let mnemonic = match kind {
                    BranchKind::Bnez => "bnez",
                    BranchKind::Beqz => "beqz",
                };
                writeln!(self.output, "  {mnemonic} t0, .L{}", target.0).unwrap();
            }
            Instruction::Jump { target } => {
                writeln!(self.output, "  j .L{}", target.0).unwrap();
            }
            Instruction::Label(label) => {
                writeln!(self.output, ".L{}:", label.0).unwrap();
            }
            Instruction::Call { dest, callee, args } => {
                if !module.funcs.contains_key(callee) && !module.lib_funcs.contains_key(callee) {
                    return Err(CodeGenError::UnknownCallee(callee.to_string()));
                }
                for (i, a) in args.iter().enumerate() {
                    self.read_into_t0(*a, slot_of)?;
                    writeln!(self.output, "  mv a{i}, t0").unwrap();
                }
                writeln!(self.output, "  call {callee}").unwrap();
                writeln!(self.output, "  mv t0, a0").unwrap();
                self.write_from_t0(*dest, slot_of)?;
            }
            Instruction::Return { val } => {
                self.read_into_t0(*val, slot_of)?;
                self.emit_epilogue(f, frame);
            }
            Instruction::Binary { op, dest, lhs, rhs } => {
                self.read_into_t0(*lhs, slot_of)?;
                writeln!(self.output, "  mv t1, t0").unwrap();
                self.read_into_t0(*rhs, slot_of)?;
                self.emit_binary_op(*op);
                self.write_from_t0(*dest, slot_of)?;
            }
            Instruction::Unary { op, dest, opr } => {
                self.read_into_t0(*opr, slot_of)?;
                match op {
                    UnOp::Neg => writeln!(self.output, "  neg t0, t0").unwrap(),
                    UnOp::Not => writeln!(self.output, "  seqz t0, t0").unwrap(),
                }
                self.write_from_t0(*dest, slot_of)?;
            }
        }
        Ok(())
    }

    /// `t1` holds the lhs, `t0` holds the rhs; result goes into `t0`.
    fn emit_binary_op(&mut self, op: BinOp) {
        match op {
            BinOp::Add => writeln!(self.output, "  add t0, t1, t0").unwrap(),
            BinOp::Sub => writeln!(self.output, "  sub t0, t1, t0").unwrap(),
            BinOp::Mul => writeln!(self.output, "  mul t0, t1, t0").unwrap(),
            BinOp::Div => writeln!(self.output, "  div t0, t1, t0").unwrap(),
            BinOp::Mod => writeln!(self.output, "  rem t0, t1, t0").unwrap(),
            BinOp::Less => writeln!(self.output, "  slt t0, t1, t0").unwrap(),
            BinOp::LessEq => {
                // lhs <= rhs  <=>  !(rhs < lhs). RISC-V has no `sgt`
                // pseudo-op, so this reverses slt's operands instead
                // (spec.md §4.5 Open Question 1).
                writeln!(self.output, "  slt t0, t0, t1").unwrap();
                writeln!(self.output, "  seqz t0, t0").unwrap();
            }
            BinOp::Eq => {
                writeln!(self.output, "  xor t0, t1, t0").unwrap();
                writeln!(self.output, "  seqz t0, t0").unwrap();
            }
            BinOp::NotEq => {
                writeln!(self.output, "  xor t0, t1, t0").unwrap();
                writeln!(self.output, "  snez t0, t0").unwrap();
            }
        }
    }
}

impl Default for AsmGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Stack frame size in bytes for a function with `arg_count` parameters
/// and `slot_count` distinct virtual registers (spec.md §4.5): `S` local
/// slots, `A` parameter-save slots, one return-address slot, rounded up
/// to a 16-byte boundary.
pub fn frame_size(arg_count: usize, slot_count: usize) -> u32 {
    ((((arg_count + slot_count) / 4) + 1) * 16) as u32
}

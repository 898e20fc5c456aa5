//! Instruction emission for the eight operators plus program bracketing.
//!
//! The emitted program works on three module-level bindings: `memory` (a list
//! of ints), `pointer` (an index into it), and `stdin`/`stdout` imported from
//! `sys`. Every operator template leaves the operand stack as it found it.

use pyfuck_bytecode::{CompareOp, Constant, Instruction, Opcode};

use crate::options::CompileOptions;
use crate::{Error, Result};

use super::pool::{ConstantPool, NamePool};

const SYS: &str = "sys";
const STDIN: &str = "stdin";
const STDOUT: &str = "stdout";
const MEMORY: &str = "memory";
const POINTER: &str = "pointer";

/// Cell values wrap modulo this.
const CELL_MODULUS: i64 = 256;

/// An open loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LoopMark {
    /// Word offset the closing jump returns to.
    target: u32,
    /// Byte offset of the `[` in the source.
    origin: usize,
}

/// Owns the growing instruction sequence and everything it references.
#[derive(Debug, Default)]
pub struct EmissionContext {
    instructions: Vec<Instruction>,
    /// Length of the encoded code string in words, prefixes included.
    code_units: u32,
    consts: ConstantPool,
    names: NamePool,
    loops: Vec<LoopMark>,
    depth: i64,
    max_depth: i64,
}

impl EmissionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn code_units(&self) -> u32 {
        self.code_units
    }

    pub fn consts(&self) -> &ConstantPool {
        &self.consts
    }

    pub fn names(&self) -> &NamePool {
        &self.names
    }

    /// Number of loops currently open.
    pub fn loop_depth(&self) -> usize {
        self.loops.len()
    }

    /// Deepest operand stack reached by the code emitted so far.
    pub fn max_stack_depth(&self) -> u32 {
        self.max_depth as u32
    }

    /// The encoded code string.
    pub fn code(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.code_units as usize * 2);
        for instr in &self.instructions {
            instr.encode_into(&mut out);
        }
        out
    }

    /// Append one instruction built from `opcode` and `arg`.
    pub fn append_op(&mut self, opcode: Opcode, arg: u32) {
        self.append_instruction(Instruction::new(opcode, arg));
    }

    /// Append a prebuilt instruction.
    pub fn append_instruction(&mut self, instr: Instruction) {
        self.code_units += instr.code_units();
        self.depth += instr.opcode.stack_effect(instr.arg);
        debug_assert!(self.depth >= 0, "operand stack underflow at {instr:?}");
        self.max_depth = self.max_depth.max(self.depth);
        self.instructions.push(instr);
    }

    fn load_const(&mut self, value: impl Into<Constant>) -> Result<()> {
        let index = self.consts.intern(value.into())?;
        self.append_op(Opcode::LoadConst, index);
        Ok(())
    }

    fn load_name(&mut self, name: &str) {
        let index = self.names.intern(name);
        self.append_op(Opcode::LoadName, index);
    }

    fn store_name(&mut self, name: &str) {
        let index = self.names.intern(name);
        self.append_op(Opcode::StoreName, index);
    }

    /// Name-indexed opcodes other than load/store (imports, methods).
    fn append_named(&mut self, opcode: Opcode, name: &str) {
        let index = self.names.intern(name);
        self.append_op(opcode, index);
    }

    fn shift_pointer(&mut self, op: Opcode, count: u32) -> Result<()> {
        self.load_name(POINTER);
        self.load_const(count)?;
        self.append_op(op, 0);
        self.store_name(POINTER);
        Ok(())
    }

    /// `pointer += count`
    pub fn increment_pointer(&mut self, count: u32) -> Result<()> {
        self.shift_pointer(Opcode::InplaceAdd, count)
    }

    /// `pointer -= count`
    pub fn decrement_pointer(&mut self, count: u32) -> Result<()> {
        self.shift_pointer(Opcode::InplaceSubtract, count)
    }

    fn adjust_cell(&mut self, op: Opcode, count: u32) -> Result<()> {
        self.load_name(MEMORY);
        self.load_name(POINTER);
        // Keep memory and pointer for the store.
        self.append_op(Opcode::DupTopTwo, 0);
        self.append_op(Opcode::BinarySubscr, 0);
        self.load_const(count)?;
        self.append_op(op, 0);
        self.load_const(CELL_MODULUS)?;
        self.append_op(Opcode::InplaceModulo, 0);
        self.append_op(Opcode::RotThree, 0);
        self.append_op(Opcode::StoreSubscr, 0);
        Ok(())
    }

    /// `memory[pointer] = (memory[pointer] + count) % 256`
    pub fn increment_cell(&mut self, count: u32) -> Result<()> {
        self.adjust_cell(Opcode::InplaceAdd, count)
    }

    /// `memory[pointer] = (memory[pointer] - count) % 256`
    pub fn decrement_cell(&mut self, count: u32) -> Result<()> {
        self.adjust_cell(Opcode::InplaceSubtract, count)
    }

    fn load_cell(&mut self) {
        self.load_name(MEMORY);
        self.load_name(POINTER);
        self.append_op(Opcode::BinarySubscr, 0);
    }

    /// `stdout.write(chr(memory[pointer]))`
    pub fn output_cell(&mut self) -> Result<()> {
        self.load_name(STDOUT);
        self.append_named(Opcode::LoadMethod, "write");
        self.load_name("chr");
        self.load_cell();
        self.append_op(Opcode::CallFunction, 1);
        self.append_op(Opcode::CallMethod, 1);
        self.append_op(Opcode::PopTop, 0);
        Ok(())
    }

    /// `memory[pointer] = ord(stdin.read(1))`
    pub fn input_cell(&mut self) -> Result<()> {
        self.load_name("ord");
        self.load_name(STDIN);
        self.append_named(Opcode::LoadMethod, "read");
        self.load_const(1i64)?;
        self.append_op(Opcode::CallMethod, 1);
        self.append_op(Opcode::CallFunction, 1);
        self.load_name(MEMORY);
        self.load_name(POINTER);
        self.append_op(Opcode::StoreSubscr, 0);
        Ok(())
    }

    /// Open a loop at the current word offset. Emits nothing.
    ///
    /// `origin` is the source byte offset of the `[`, kept for diagnostics.
    pub fn loop_start(&mut self, origin: usize) {
        self.loops.push(LoopMark {
            target: self.code_units,
            origin,
        });
    }

    /// Close the innermost loop: jump back to its start unless the cell is zero.
    ///
    /// The body always runs at least once; the test happens only here.
    pub fn loop_end(&mut self, origin: usize) -> Result<()> {
        let mark = self
            .loops
            .pop()
            .ok_or(Error::UnbalancedLoop { offset: origin })?;

        self.load_cell();
        self.load_const(0i64)?;
        self.append_op(Opcode::CompareOp, CompareOp::Equal as u32);
        self.append_op(Opcode::PopJumpIfFalse, mark.target);
        Ok(())
    }

    /// Bind `stdin`/`stdout`, allocate memory, zero the pointer.
    pub fn init_program(&mut self, options: &CompileOptions) -> Result<()> {
        // from sys import stdin, stdout
        self.load_const(0i64)?;
        self.load_const(STDIN)?;
        self.load_const(STDOUT)?;
        self.append_op(Opcode::BuildTuple, 2);
        self.append_named(Opcode::ImportName, SYS);
        self.append_named(Opcode::ImportFrom, STDIN);
        self.store_name(STDIN);
        self.append_named(Opcode::ImportFrom, STDOUT);
        self.store_name(STDOUT);
        self.append_op(Opcode::PopTop, 0);

        // memory = [0] * cells
        self.load_const(0i64)?;
        self.append_op(Opcode::BuildList, 1);
        self.load_const(options.memory_cells)?;
        self.append_op(Opcode::BinaryMultiply, 0);
        self.store_name(MEMORY);

        // pointer = 0
        self.load_const(0i64)?;
        self.store_name(POINTER);
        Ok(())
    }

    /// `return None`. Fails if a loop is still open.
    pub fn terminate(&mut self) -> Result<()> {
        if let Some(mark) = self.loops.last() {
            return Err(Error::UnclosedLoop {
                offset: mark.origin,
            });
        }
        self.load_const(Constant::None)?;
        self.append_op(Opcode::ReturnValue, 0);
        Ok(())
    }
}

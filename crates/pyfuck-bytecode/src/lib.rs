//! Bytecode format definitions for pyfuck.
//!
//! This crate contains:
//! - CPython 3.10 opcode numbering and the operand encoder (EXTENDED_ARG chains)
//! - The `.pyc` module header and marshal type tags
//! - A marshal writer with its reference table, and a reader for the subset it writes
//! - Human-readable disassembly (`dump`)

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod bytecode;
pub mod colors;

// Re-export commonly used items at crate root
pub use bytecode::{
    ArgKind, CO_NOFREE, CodeObject, CompareOp, Constant, Decoded, EncodeError, FLAG_REF,
    HEADER_SIZE, Header, Instruction, MAGIC, MarshalWriter, Module, ModuleError, Opcode,
    STACK_SIZE, TypeTag, WORD_SIZE, decode, dump,
};
pub use colors::Colors;
